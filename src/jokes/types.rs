//! Joke types — sources, acquisition results and the failure taxonomy.

use std::fmt;

use crate::error::ErrorCode;

// =============================================================================
// SOURCE
// =============================================================================

/// One of the two upstream joke providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JokeSource {
    /// `v2.jokeapi.dev` — tolerates malformed payloads with shape retries.
    JokeApi,
    /// `icanhazdadjoke.com` — single attempt, requires an `Accept` header.
    DadJoke,
}

impl JokeSource {
    /// Human-readable provider name used in consumer messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::JokeApi => "JokeAPI",
            Self::DadJoke => "Dad Joke API",
        }
    }
}

impl fmt::Display for JokeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// FAILURE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network or status errors that outlasted the backoff fetcher.
    Transport,
    /// Valid JSON without the expected joke fields.
    MalformedPayload,
    /// The upstream explicitly flagged an error.
    ApplicationError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Transport => "transport failure",
            Self::MalformedPayload => "malformed payload",
            Self::ApplicationError => "application error",
        })
    }
}

/// Terminal failure of one acquisition call.
///
/// `detail` is for logs; consumers get [`JokeFailure::message`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} from {provider}: {detail}")]
pub struct JokeFailure {
    pub provider: JokeSource,
    pub kind: FailureKind,
    pub detail: String,
}

impl JokeFailure {
    pub fn new(provider: JokeSource, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self { provider, kind, detail: detail.into() }
    }

    #[must_use]
    pub fn source_label(&self) -> &'static str {
        self.provider.label()
    }

    /// The message shown to the consumer.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Failed to load a joke from {}.", self.source_label())
    }
}

impl ErrorCode for JokeFailure {
    fn error_code(&self) -> &'static str {
        match self.kind {
            FailureKind::Transport => "E_JOKE_TRANSPORT",
            FailureKind::MalformedPayload => "E_JOKE_MALFORMED",
            FailureKind::ApplicationError => "E_JOKE_APPLICATION",
        }
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// Exactly one of these is produced per acquisition call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JokeResult {
    Success { text: String },
    Failure(JokeFailure),
}

impl JokeResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<String, JokeFailure>> for JokeResult {
    fn from(result: Result<String, JokeFailure>) -> Self {
        match result {
            Ok(text) => Self::Success { text },
            Err(failure) => Self::Failure(failure),
        }
    }
}

/// JavaScript-style truthiness for upstream JSON flags.
pub(crate) fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The value at `key` when it is a non-empty string.
pub(crate) fn non_empty_str<'a>(body: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(serde_json::Value::as_str).filter(|s| !s.is_empty())
}
