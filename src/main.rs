use tokio::io::{AsyncBufReadExt, BufReader};

use jokecard::config::{ConfigError, JokeConfig};
use jokecard::fetch::FetchError;
use jokecard::jokes::JokeClient;
use jokecard::services::joke;
use jokecard::state::{AcquisitionOutcome, AppState};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] FetchError),
    #[error("stdin read failed: {0}")]
    Stdin(#[from] std::io::Error),
    #[error("outcome encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let output = match std::env::var("JOKE_OUTPUT").as_deref() {
        Ok("json") => Output::Json,
        _ => Output::Text,
    };
    let config = JokeConfig::from_env()?;
    tracing::info!(source = ?config.source, "jokecard starting");

    let state = AppState::new(JokeClient::from_config(config)?);

    // First joke on startup, then one per Enter until `q` or EOF.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let ticket = joke::begin(&state).await;
        render(&state.snapshot().await, output)?;
        let outcome = joke::complete(&state, ticket).await;
        render(&outcome, output)?;

        if output == Output::Text {
            eprintln!("[Enter] another joke, [q] quit");
        }
        match lines.next_line().await? {
            Some(line) if matches!(line.trim(), "q" | "quit") => break,
            Some(_) => {}
            None => break,
        }
    }

    Ok(())
}

fn render(outcome: &AcquisitionOutcome, output: Output) -> Result<(), AppError> {
    match output {
        Output::Json => println!("{}", serde_json::to_string(outcome)?),
        Output::Text => {
            if outcome.is_loading {
                eprintln!("Loading a fresh joke...");
            } else if let Some(joke) = &outcome.joke {
                println!("\n{joke}\n");
            } else if let Some(message) = &outcome.error_message {
                println!("\n{message}\n");
            }
        }
    }
    Ok(())
}
