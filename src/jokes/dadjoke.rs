//! icanhazdadjoke source. One fetcher call with `Accept: application/json`.

use super::types::{FailureKind, JokeFailure, JokeSource, non_empty_str};
use crate::config::FetchBudget;
use crate::fetch::{self, FetchAttemptConfig, FetchRequest, HttpTransport};

const INVALID_STRUCTURE: &str = "Dad Joke API returned an invalid response structure.";

pub(crate) async fn fetch(transport: &dyn HttpTransport, url: &str, budget: FetchBudget) -> Result<String, JokeFailure> {
    let config = FetchAttemptConfig {
        request: FetchRequest::get(url).with_header("Accept", "application/json"),
        max_retries: budget.max_retries,
        base_delay_ms: budget.base_delay_ms,
    };

    let body = fetch::fetch_json(transport, &config)
        .await
        .map_err(|e| JokeFailure::new(JokeSource::DadJoke, FailureKind::Transport, e.to_string()))?;

    parse_joke(&body)
}

fn parse_joke(body: &serde_json::Value) -> Result<String, JokeFailure> {
    non_empty_str(body, "joke")
        .map(str::to_string)
        .ok_or_else(|| JokeFailure::new(JokeSource::DadJoke, FailureKind::MalformedPayload, INVALID_STRUCTURE))
}

#[cfg(test)]
#[path = "dadjoke_test.rs"]
mod tests;
