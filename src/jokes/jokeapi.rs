//! JokeAPI source (`v2.jokeapi.dev`).
//!
//! The endpoint occasionally answers with valid JSON that lacks the joke
//! fields. Those bodies are retried on a fixed short delay, layered over the
//! fetcher's own transport backoff. Transport failures and bodies carrying
//! the `error` flag end the call immediately.

use std::time::Duration;

use serde_json::Value;

use super::types::{FailureKind, JokeFailure, JokeSource, is_truthy, non_empty_str};
use crate::config::{FetchBudget, ShapeBudget};
use crate::error::ErrorCode;
use crate::fetch::{self, FetchAttemptConfig, FetchError, FetchRequest, HttpTransport};
use crate::retry::{self, RetryError, RetryPolicy};

const DEFAULT_ERROR_MESSAGE: &str = "API reported an internal error.";
const EXHAUSTED_MESSAGE: &str = "Failed to fetch a complete joke after multiple retries.";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
enum JokeApiError {
    #[error(transparent)]
    Transport(FetchError),

    #[error("{0}")]
    Application(String),

    #[error("malformed joke data")]
    Malformed,
}

impl ErrorCode for JokeApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(e) => e.error_code(),
            Self::Application(_) => "E_JOKEAPI_APPLICATION",
            Self::Malformed => "E_JOKEAPI_MALFORMED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

// =============================================================================
// FETCH
// =============================================================================

/// Fetch one single-type joke, retrying malformed bodies under `shape`.
pub(crate) async fn fetch(
    transport: &dyn HttpTransport,
    url: &str,
    budget: FetchBudget,
    shape: ShapeBudget,
) -> Result<String, JokeFailure> {
    let config = FetchAttemptConfig {
        request: FetchRequest::get(url),
        max_retries: budget.max_retries,
        base_delay_ms: budget.base_delay_ms,
    };
    let policy = RetryPolicy::fixed(shape.max_attempts, Duration::from_millis(shape.retry_delay_ms));
    let config = &config;

    retry::run(policy, JokeSource::JokeApi.label(), |_| async move {
        let body = fetch::fetch_json(transport, config)
            .await
            .map_err(JokeApiError::Transport)?;
        classify(&body)
    })
    .await
    .map_err(into_failure)
}

/// Sort a decoded body into joke, application error or malformed.
fn classify(body: &Value) -> Result<String, JokeApiError> {
    if body.get("error").is_some_and(is_truthy) {
        let message = non_empty_str(body, "message").unwrap_or(DEFAULT_ERROR_MESSAGE);
        return Err(JokeApiError::Application(message.to_string()));
    }

    let single = body.get("type").and_then(Value::as_str) == Some("single");
    match non_empty_str(body, "joke") {
        Some(joke) if single => Ok(joke.to_string()),
        _ => Err(JokeApiError::Malformed),
    }
}

fn into_failure(err: RetryError<JokeApiError>) -> JokeFailure {
    let failure = |kind, detail: String| JokeFailure::new(JokeSource::JokeApi, kind, detail);
    match err {
        RetryError::NoAttempts => failure(FailureKind::Transport, FetchError::NoAttempts.to_string()),
        RetryError::Exhausted { .. } => failure(FailureKind::MalformedPayload, EXHAUSTED_MESSAGE.to_string()),
        RetryError::Aborted { error: JokeApiError::Transport(e), .. } => failure(FailureKind::Transport, e.to_string()),
        RetryError::Aborted { error: JokeApiError::Application(message), .. } => {
            failure(FailureKind::ApplicationError, message)
        }
        RetryError::Aborted { error: JokeApiError::Malformed, .. } => {
            failure(FailureKind::MalformedPayload, EXHAUSTED_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
#[path = "jokeapi_test.rs"]
mod tests;
