//! reqwest-backed transport.
//!
//! Thin HTTP wrapper: it sends exactly one request and hands back the status
//! and body text. Status checks and JSON decoding happen in the fetcher.

use std::time::Duration;

use super::HttpTransport;
use super::types::{FetchError, FetchRequest, Method, RawResponse};

const USER_AGENT: &str = concat!("jokecard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`FetchError::HttpClientBuild`] if the client cannot be built.
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &FetchRequest) -> Result<RawResponse, FetchError> {
        let mut builder = match request.method {
            Method::Get => self.http.get(&request.url),
            Method::Post => self.http.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
