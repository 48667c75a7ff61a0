//! Fetch — HTTP GET/POST with exponential-backoff retry.
//!
//! DESIGN
//! ======
//! `fetch_json` knows nothing about jokes. It wraps one attempt (send, check
//! status, decode JSON) in an exponential `RetryPolicy` built from the
//! caller's `FetchAttemptConfig`. The network sits behind the
//! `HttpTransport` trait so tests can script responses.

pub mod http;
pub mod types;

use std::time::Duration;

pub use http::{HttpTimeouts, ReqwestTransport};
pub use types::{FetchAttemptConfig, FetchError, FetchRequest, Method, RawResponse};

use tracing::debug;

use crate::retry::{self, RetryPolicy};

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends one HTTP request. Enables mocking in tests.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the request cannot be completed.
    async fn send(&self, request: &FetchRequest) -> Result<RawResponse, FetchError>;
}

// =============================================================================
// FETCHER
// =============================================================================

/// Fetch and JSON-decode `config.request`, retrying with exponential backoff.
///
/// After failed attempt `i` (0-based) the fetcher waits
/// `base_delay_ms * 2^i` before trying again. The first 2xx response with a
/// decodable body is returned immediately.
///
/// # Errors
///
/// Returns the last attempt's [`FetchError`] once `max_retries` attempts have
/// failed, or [`FetchError::NoAttempts`] when `max_retries` is zero.
pub async fn fetch_json(
    transport: &dyn HttpTransport,
    config: &FetchAttemptConfig,
) -> Result<serde_json::Value, FetchError> {
    let policy = RetryPolicy::exponential(config.max_retries, Duration::from_millis(config.base_delay_ms));
    let request = &config.request;

    retry::run(policy, &request.url, |attempt| async move {
        debug!(url = %request.url, attempt, "sending request");
        let response = transport.send(request).await?;
        decode_response(response)
    })
    .await
    .map_err(|e| e.into_inner().unwrap_or(FetchError::NoAttempts))
}

fn decode_response(response: RawResponse) -> Result<serde_json::Value, FetchError> {
    if !response.is_success() {
        return Err(FetchError::Status { status: response.status, body: response.body });
    }
    serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;

    type Scripted = Result<RawResponse, FetchError>;

    /// Transport that replays scripted responses and records every request.
    ///
    /// Once the script runs out, `fallback` is produced for every further call.
    pub struct ScriptedTransport {
        script: Mutex<VecDeque<Scripted>>,
        fallback: fn() -> Scripted,
        calls: Mutex<Vec<(Instant, FetchRequest)>>,
    }

    impl ScriptedTransport {
        #[must_use]
        pub fn new(script: Vec<Scripted>) -> Self {
            Self::with_fallback(script, || Err(FetchError::Request("connection refused".into())))
        }

        #[must_use]
        pub fn with_fallback(script: Vec<Scripted>, fallback: fn() -> Scripted) -> Self {
            Self { script: Mutex::new(script.into()), fallback, calls: Mutex::new(Vec::new()) }
        }

        /// Transport whose every call fails at the network layer.
        #[must_use]
        pub fn unreachable() -> Self {
            Self::new(Vec::new())
        }

        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        #[must_use]
        pub fn requests(&self) -> Vec<FetchRequest> {
            self.calls.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
        }

        /// Simulated time between consecutive calls.
        #[must_use]
        pub fn gaps(&self) -> Vec<Duration> {
            let calls = self.calls.lock().unwrap();
            calls.windows(2).map(|w| w[1].0 - w[0].0).collect()
        }
    }

    #[async_trait::async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: &FetchRequest) -> Result<RawResponse, FetchError> {
            self.calls.lock().unwrap().push((Instant::now(), request.clone()));
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(self.fallback)
        }
    }

    /// A 200 response carrying `body` serialized as JSON.
    #[must_use]
    pub fn ok_json(body: &serde_json::Value) -> Scripted {
        Ok(RawResponse { status: 200, body: body.to_string() })
    }

    #[must_use]
    pub fn status(status: u16) -> Scripted {
        Ok(RawResponse { status, body: String::new() })
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
