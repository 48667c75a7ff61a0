//! Joke client configuration parsed from environment variables.

use crate::fetch::HttpTimeouts;
use crate::jokes::JokeSource;

pub const DEFAULT_JOKEAPI_URL: &str =
    "https://v2.jokeapi.dev/joke/Any?blacklistFlags=nsfw,religious,political,racist,sexist,explicit&type=single";
pub const DEFAULT_DADJOKE_URL: &str = "https://icanhazdadjoke.com/";
pub const DEFAULT_FETCH_MAX_RETRIES: u32 = 5;
pub const DEFAULT_FETCH_BASE_DELAY_MS: u64 = 1000;
pub const DEFAULT_SHAPE_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_SHAPE_RETRY_DELAY_MS: u64 = 500;
pub const DEFAULT_HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

impl crate::error::ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        "E_CONFIG_PARSE"
    }
}

/// How the upstream joke source is chosen for each acquisition call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChoice {
    Random,
    Fixed(JokeSource),
}

/// Transport-level retry budget handed to the backoff fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchBudget {
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

/// Payload-shape retry budget for sources that tolerate malformed bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeBudget {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeConfig {
    pub source: SourceChoice,
    pub jokeapi_url: String,
    pub dadjoke_url: String,
    pub fetch: FetchBudget,
    pub shape: ShapeBudget,
    pub timeouts: HttpTimeouts,
}

impl Default for JokeConfig {
    fn default() -> Self {
        Self {
            source: SourceChoice::Random,
            jokeapi_url: DEFAULT_JOKEAPI_URL.to_string(),
            dadjoke_url: DEFAULT_DADJOKE_URL.to_string(),
            fetch: FetchBudget { max_retries: DEFAULT_FETCH_MAX_RETRIES, base_delay_ms: DEFAULT_FETCH_BASE_DELAY_MS },
            shape: ShapeBudget {
                max_attempts: DEFAULT_SHAPE_MAX_ATTEMPTS,
                retry_delay_ms: DEFAULT_SHAPE_RETRY_DELAY_MS,
            },
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_HTTP_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

impl JokeConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `JOKE_SOURCE`: `random` (default), `jokeapi` or `dadjoke`
    /// - `JOKEAPI_URL`, `DADJOKE_URL`: upstream endpoints
    /// - `FETCH_MAX_RETRIES`: default 5
    /// - `FETCH_BASE_DELAY_MS`: default 1000
    /// - `SHAPE_MAX_ATTEMPTS`: default 5
    /// - `SHAPE_RETRY_DELAY_MS`: default 500
    /// - `HTTP_REQUEST_TIMEOUT_SECS`: default 10
    /// - `HTTP_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for an unknown `JOKE_SOURCE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let source = parse_source(std::env::var("JOKE_SOURCE").ok().as_deref())?;

        Ok(Self {
            source,
            jokeapi_url: std::env::var("JOKEAPI_URL").unwrap_or_else(|_| DEFAULT_JOKEAPI_URL.to_string()),
            dadjoke_url: std::env::var("DADJOKE_URL").unwrap_or_else(|_| DEFAULT_DADJOKE_URL.to_string()),
            fetch: FetchBudget {
                max_retries: env_parse("FETCH_MAX_RETRIES", DEFAULT_FETCH_MAX_RETRIES),
                base_delay_ms: env_parse("FETCH_BASE_DELAY_MS", DEFAULT_FETCH_BASE_DELAY_MS),
            },
            shape: ShapeBudget {
                max_attempts: env_parse("SHAPE_MAX_ATTEMPTS", DEFAULT_SHAPE_MAX_ATTEMPTS),
                retry_delay_ms: env_parse("SHAPE_RETRY_DELAY_MS", DEFAULT_SHAPE_RETRY_DELAY_MS),
            },
            timeouts: HttpTimeouts {
                request_secs: env_parse("HTTP_REQUEST_TIMEOUT_SECS", DEFAULT_HTTP_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse("HTTP_CONNECT_TIMEOUT_SECS", DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_source(raw: Option<&str>) -> Result<SourceChoice, ConfigError> {
    match raw.unwrap_or("random") {
        "random" => Ok(SourceChoice::Random),
        "jokeapi" => Ok(SourceChoice::Fixed(JokeSource::JokeApi)),
        "dadjoke" => Ok(SourceChoice::Fixed(JokeSource::DadJoke)),
        other => Err(ConfigError::Parse(format!("unknown JOKE_SOURCE: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
