//! Jokes — picks an upstream provider and turns its answer into a `JokeResult`.
//!
//! DESIGN
//! ======
//! `JokeClient` owns the transport, the source picker and the retry budgets.
//! Each `acquire` call contacts exactly one provider; there is no fallback to
//! the other one within a call. Randomness goes through `SourcePicker` so
//! tests can pin the provider.

pub mod dadjoke;
pub mod jokeapi;
pub mod types;

use std::sync::Arc;

use rand::Rng;
use tracing::{error, info};

use crate::config::{JokeConfig, SourceChoice};
use crate::error::ErrorCode;
use crate::fetch::{FetchError, HttpTransport, ReqwestTransport};
pub use types::{FailureKind, JokeFailure, JokeResult, JokeSource};

// =============================================================================
// SOURCE PICKER
// =============================================================================

/// Chooses the provider for one acquisition call.
pub trait SourcePicker: Send + Sync {
    fn pick(&self) -> JokeSource;
}

/// Uniform choice between the two providers.
pub struct RandomPicker;

impl SourcePicker for RandomPicker {
    fn pick(&self) -> JokeSource {
        if rand::rng().random_bool(0.5) { JokeSource::JokeApi } else { JokeSource::DadJoke }
    }
}

/// Always the same provider.
pub struct FixedPicker(pub JokeSource);

impl SourcePicker for FixedPicker {
    fn pick(&self) -> JokeSource {
        self.0
    }
}

impl From<SourceChoice> for Box<dyn SourcePicker> {
    fn from(choice: SourceChoice) -> Self {
        match choice {
            SourceChoice::Random => Box::new(RandomPicker),
            SourceChoice::Fixed(source) => Box::new(FixedPicker(source)),
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct JokeClient {
    transport: Arc<dyn HttpTransport>,
    picker: Box<dyn SourcePicker>,
    config: JokeConfig,
}

impl JokeClient {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, picker: Box<dyn SourcePicker>, config: JokeConfig) -> Self {
        Self { transport, picker, config }
    }

    /// Build a client backed by reqwest, with the picker named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: JokeConfig) -> Result<Self, FetchError> {
        let transport = Arc::new(ReqwestTransport::new(config.timeouts)?);
        let picker = config.source.into();
        Ok(Self::new(transport, picker, config))
    }

    /// Run one acquisition call against a single, freshly picked provider.
    pub async fn acquire(&self) -> JokeResult {
        let source = self.picker.pick();
        let transport = self.transport.as_ref();

        let result = match source {
            JokeSource::JokeApi => {
                jokeapi::fetch(transport, &self.config.jokeapi_url, self.config.fetch, self.config.shape).await
            }
            JokeSource::DadJoke => dadjoke::fetch(transport, &self.config.dadjoke_url, self.config.fetch).await,
        };

        match &result {
            Ok(text) => info!(%source, chars = text.len(), "joke loaded"),
            Err(failure) => error!(
                %source,
                code = failure.error_code(),
                kind = %failure.kind,
                detail = %failure.detail,
                "attempt failed permanently"
            ),
        }

        result.into()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
