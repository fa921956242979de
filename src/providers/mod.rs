//! External AI providers
//!
//! Available providers:
//! - `OpenAI` chat completions for answers
//! - Whisper for audio transcription
//!
//! Both are reached through the [`CompletionClient`] and
//! [`TranscriptionClient`] traits so handlers can run against test doubles.

mod instrumented;
pub mod openai;
pub mod whisper;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use instrumented::Instrumented;
pub use openai::OpenAiCompletionClient;
pub use whisper::WhisperTranscriptionClient;

/// Failure of a single provider call
///
/// The message from upstream is preserved verbatim; callers are not
/// expected to branch on the variant.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (network, TLS, DNS)
    #[error("request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response could not be interpreted
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The call did not finish in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The audio file could not be read
    #[error("could not read audio: {0}")]
    Audio(#[from] std::io::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Malformed(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Chat-completion provider
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate an answer for `user_text` under `system_prompt`
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on any upstream failure; no retry is attempted
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Speech-to-text provider
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Transcribe the audio file at `audio`
    ///
    /// When `language` is `None` the provider is sent
    /// [`crate::language::DEFAULT_LANGUAGE`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on any upstream failure
    async fn transcribe(&self, audio: &Path, language: Option<&str>) -> Result<String, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
