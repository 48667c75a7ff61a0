use super::*;
use crate::config::JokeConfig;
use crate::fetch::test_helpers::{ScriptedTransport, ok_json};
use crate::fetch::FetchError;
use crate::jokes::{FixedPicker, JokeClient, JokeSource};
use serde_json::json;
use std::sync::Arc;

fn app_state(transport: Arc<ScriptedTransport>, source: JokeSource) -> AppState {
    AppState::new(JokeClient::new(transport, Box::new(FixedPicker(source)), JokeConfig::default()))
}

#[tokio::test(start_paused = true)]
async fn refresh_success_from_jokeapi() {
    let transport = Arc::new(ScriptedTransport::new(vec![ok_json(&json!({ "type": "single", "joke": "J" }))]));
    let state = app_state(transport.clone(), JokeSource::JokeApi);

    let outcome = refresh(&state).await;

    assert_eq!(outcome, AcquisitionOutcome { joke: Some("J".into()), is_loading: false, error_message: None });
    assert_eq!(state.snapshot().await, outcome);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn refresh_dadjoke_network_failure() {
    let transport = Arc::new(ScriptedTransport::unreachable());
    let state = app_state(transport, JokeSource::DadJoke);

    let outcome = refresh(&state).await;

    assert_eq!(
        outcome,
        AcquisitionOutcome {
            joke: None,
            is_loading: false,
            error_message: Some("Failed to load a joke from Dad Joke API.".into()),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn refresh_twice_reflects_only_second_call() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        ok_json(&json!({ "type": "single", "joke": "first" })),
        ok_json(&json!({ "error": true, "message": "No jokes left" })),
    ]));
    let state = app_state(transport, JokeSource::JokeApi);

    let first = refresh(&state).await;
    assert_eq!(first.joke.as_deref(), Some("first"));

    let second = refresh(&state).await;
    assert_eq!(
        second,
        AcquisitionOutcome {
            joke: None,
            is_loading: false,
            error_message: Some("Failed to load a joke from JokeAPI.".into()),
        }
    );
    assert_eq!(state.snapshot().await, second);
}

#[tokio::test(start_paused = true)]
async fn superseded_call_does_not_overwrite_newer_result() {
    // Call A fails once and backs off; call B starts meanwhile and succeeds;
    // A's eventual success arrives last and must be dropped.
    let transport = Arc::new(ScriptedTransport::new(vec![
        Err(FetchError::Request("reset".into())),
        ok_json(&json!({ "joke": "B" })),
        ok_json(&json!({ "joke": "A" })),
    ]));
    let state = app_state(transport.clone(), JokeSource::DadJoke);

    let (a, b) = tokio::join!(refresh(&state), refresh(&state));

    assert_eq!(b.joke.as_deref(), Some("B"));
    assert_eq!(a.joke.as_deref(), Some("B"));
    assert_eq!(state.snapshot().await.joke.as_deref(), Some("B"));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn slot_is_loading_while_call_in_flight() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        Err(FetchError::Request("reset".into())),
        ok_json(&json!({ "joke": "late" })),
    ]));
    let state = app_state(transport, JokeSource::DadJoke);

    let observer = async {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        state.snapshot().await
    };
    let (outcome, mid) = tokio::join!(refresh(&state), observer);

    assert_eq!(mid, AcquisitionOutcome::loading());
    assert_eq!(outcome.joke.as_deref(), Some("late"));
}

#[tokio::test(start_paused = true)]
async fn begin_exposes_loading_until_complete() {
    let transport = Arc::new(ScriptedTransport::new(vec![ok_json(&json!({ "joke": "done" }))]));
    let state = app_state(transport.clone(), JokeSource::DadJoke);
    refresh(&state).await;

    let ticket = begin(&state).await;

    assert_eq!(state.snapshot().await, AcquisitionOutcome::loading());
    assert_eq!(transport.call_count(), 1);

    let outcome = complete(&state, ticket).await;
    assert!(!outcome.is_loading);
    assert_eq!(state.snapshot().await, outcome);
}
