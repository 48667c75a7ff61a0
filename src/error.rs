//! Shared error classification.
//!
//! Every error enum in the crate carries a stable machine-readable code and
//! says whether the failed operation may be attempted again. The retry
//! executor in [`crate::retry`] consults `retryable()` to decide between
//! backing off and aborting.

/// Trait for errors that carry a stable code and a retry hint.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
