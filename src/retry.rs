//! Retry policies and the async executor that applies them.
//!
//! DESIGN
//! ======
//! A `RetryPolicy` is plain data: an attempt budget plus a delay schedule.
//! `run` drives an async operation under one policy. Nested retry behavior
//! (transport backoff inside payload-shape retries) is expressed by calling
//! `run` inside the operation passed to an outer `run`, so each layer keeps
//! its own budget and schedule.
//!
//! ERROR HANDLING
//! ==============
//! Errors that report `retryable() == false` stop the loop at once. A zero
//! attempt budget never invokes the operation and yields `NoAttempts`, so
//! callers always get an error instead of an empty result.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::ErrorCode;

// =============================================================================
// POLICY
// =============================================================================

/// Delay schedule between failed attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    /// Same delay after every failed attempt.
    Fixed(Duration),
    /// `base * 2^i` after failed attempt `i` (0-based).
    Exponential { base: Duration },
}

/// Attempt budget plus delay schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Delay,
}

impl RetryPolicy {
    #[must_use]
    pub fn exponential(max_attempts: u32, base: Duration) -> Self {
        Self { max_attempts, delay: Delay::Exponential { base } }
    }

    #[must_use]
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay: Delay::Fixed(delay) }
    }

    /// Delay to wait after failed attempt `attempt_index` (0-based).
    #[must_use]
    pub fn delay_after(&self, attempt_index: u32) -> Duration {
        match self.delay {
            Delay::Fixed(d) => d,
            Delay::Exponential { base } => {
                let factor = 2_u32.checked_pow(attempt_index).unwrap_or(u32::MAX);
                base.saturating_mul(factor)
            }
        }
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Why a retried operation finally gave up.
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// The policy allowed zero attempts; the operation never ran.
    #[error("retry budget allows no attempts")]
    NoAttempts,

    /// Every allowed attempt failed with a retryable error.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: E,
    },

    /// An attempt failed with an error that must not be retried.
    #[error("aborted on attempt {attempt}: {error}")]
    Aborted {
        attempt: u32,
        #[source]
        error: E,
    },
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// The underlying error of the last attempt, if any attempt ran.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::NoAttempts => None,
            Self::Exhausted { last, .. } => Some(last),
            Self::Aborted { error, .. } => Some(error),
        }
    }
}

// =============================================================================
// EXECUTOR
// =============================================================================

/// Run `op` under `policy`.
///
/// `op` receives the 1-based attempt number. `label` only tags log lines.
///
/// # Errors
///
/// Returns [`RetryError`] when the budget is zero, when a non-retryable error
/// occurs, or when every attempt failed.
pub async fn run<T, E, F, Fut>(policy: RetryPolicy, label: &str, mut op: F) -> Result<T, RetryError<E>>
where
    E: std::error::Error + ErrorCode + 'static,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    for index in 0..policy.max_attempts {
        let attempt = index + 1;
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) if !error.retryable() => {
                return Err(RetryError::Aborted { attempt, error });
            }
            Err(last) if attempt == policy.max_attempts => {
                return Err(RetryError::Exhausted { attempts: attempt, last });
            }
            Err(error) => {
                let delay = policy.delay_after(index);
                warn!(
                    %label,
                    error = %error,
                    code = error.error_code(),
                    attempt,
                    total = policy.max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "attempt failed; retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    Err(RetryError::NoAttempts)
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
