//! Fetch types — request description, raw response and errors.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by the backoff fetcher and its transports.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error! Status: {status}")]
    Status { status: u16, body: String },

    /// The body was not valid JSON.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The retry budget was zero, so no request was made.
    #[error("fetch failed after all retries")]
    NoAttempts,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl crate::error::ErrorCode for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_FETCH_REQUEST",
            Self::Status { .. } => "E_FETCH_STATUS",
            Self::Decode(_) => "E_FETCH_DECODE",
            Self::NoAttempts => "E_FETCH_NO_ATTEMPTS",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { .. } | Self::Decode(_))
    }
}

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

/// A single HTTP request: URL plus the options applied on every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl FetchRequest {
    /// A plain GET with no extra headers.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    /// A POST carrying `body` verbatim.
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self { method: Method::Post, url: url.into(), body: Some(body.into()), ..Self::default() }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Per-call fetch configuration. Immutable for the duration of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAttemptConfig {
    pub request: FetchRequest,
    /// Total attempts allowed, including the first.
    pub max_retries: u32,
    /// Delay after the first failure; doubles after each further failure.
    pub base_delay_ms: u64,
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Status and body text as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
