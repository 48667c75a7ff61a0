//! Joke service — the trigger behind "show me another joke".
//!
//! Runs one acquisition call against the shared outcome slot. Callers are
//! expected to hold off while `is_loading` is set, but overlapping calls are
//! safe: only the newest call's result is committed.

use tracing::debug;

use crate::state::{AcquisitionOutcome, AppState, Ticket};

/// Start a new acquisition call and wait for it to finish.
///
/// Returns the slot contents after the call. If a newer call started in the
/// meantime this call's result is discarded and the newer state is returned.
pub async fn refresh(state: &AppState) -> AcquisitionOutcome {
    let ticket = begin(state).await;
    complete(state, ticket).await
}

/// Reset the slot to loading and claim it for a new call.
pub async fn begin(state: &AppState) -> Ticket {
    state.outcome.write().await.begin()
}

/// Run the acquisition for `ticket` and commit it if still current.
pub async fn complete(state: &AppState, ticket: Ticket) -> AcquisitionOutcome {
    let result = state.jokes.acquire().await;

    let mut slot = state.outcome.write().await;
    if !slot.commit(ticket, &result) {
        debug!(?ticket, current = slot.generation(), "discarding superseded joke result");
    }
    slot.outcome().clone()
}

#[cfg(test)]
#[path = "joke_test.rs"]
mod tests;
