//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` holds the joke client and the single outcome slot read by the
//! presentation layer. The slot is tagged with a generation counter: each
//! acquisition call takes a `Ticket` when it starts and may only commit its
//! result while that ticket is still the newest. A superseded call runs to
//! completion but its result is dropped instead of overwriting a newer one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::jokes::{JokeClient, JokeResult};

// =============================================================================
// OUTCOME
// =============================================================================

/// What the presentation layer renders.
///
/// Outside the loading state exactly one of `joke` and `error_message` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionOutcome {
    pub joke: Option<String>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl AcquisitionOutcome {
    #[must_use]
    pub fn loading() -> Self {
        Self { joke: None, is_loading: true, error_message: None }
    }

    #[must_use]
    pub fn from_result(result: &JokeResult) -> Self {
        match result {
            JokeResult::Success { text } => Self { joke: Some(text.clone()), is_loading: false, error_message: None },
            JokeResult::Failure(failure) => {
                Self { joke: None, is_loading: false, error_message: Some(failure.message()) }
            }
        }
    }
}

impl Default for AcquisitionOutcome {
    fn default() -> Self {
        Self::loading()
    }
}

// =============================================================================
// OUTCOME SLOT
// =============================================================================

/// Proof that an acquisition call started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct OutcomeSlot {
    generation: u64,
    outcome: AcquisitionOutcome,
}

impl OutcomeSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to loading and hand out a ticket for the new call.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.outcome = AcquisitionOutcome::loading();
        Ticket(self.generation)
    }

    /// Store the terminal outcome for `ticket`. Returns `false` and leaves the
    /// slot untouched when a newer call has started since.
    pub fn commit(&mut self, ticket: Ticket, result: &JokeResult) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.outcome = AcquisitionOutcome::from_result(result);
        true
    }

    #[must_use]
    pub fn outcome(&self) -> &AcquisitionOutcome {
        &self.outcome
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Clone is cheap: all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub outcome: Arc<RwLock<OutcomeSlot>>,
    pub jokes: Arc<JokeClient>,
}

impl AppState {
    #[must_use]
    pub fn new(jokes: JokeClient) -> Self {
        Self { outcome: Arc::new(RwLock::new(OutcomeSlot::new())), jokes: Arc::new(jokes) }
    }

    /// Read-only copy of the current outcome.
    pub async fn snapshot(&self) -> AcquisitionOutcome {
        self.outcome.read().await.outcome().clone()
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
