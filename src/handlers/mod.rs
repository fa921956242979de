//! Request orchestration for the chat and voice endpoints
//!
//! Handlers sequence the collaborators and return a result or a
//! [`HandlerError`]. They hold no per-request state and never touch HTTP types.

mod chat;
mod voice;

use thiserror::Error;

use crate::providers::ProviderError;

pub use chat::{ChatHandler, ChatRequest, ChatResult};
pub use voice::{AudioFormat, ScopedAudioFile, VoiceHandler, VoiceResult, VoiceUpload};

/// Input rejected before any provider call
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Chat message is empty or whitespace
    #[error("message must not be empty")]
    EmptyMessage,

    /// Declared content type is not an accepted audio format
    #[error("unsupported audio type: {0}")]
    UnsupportedMediaType(String),

    /// Upload exceeds the size limit
    #[error("audio file exceeds the maximum size of {} MiB", .limit / (1024 * 1024))]
    PayloadTooLarge { limit: usize },

    /// No `file` part in the upload
    #[error("missing audio file")]
    MissingFile,
}

/// Failure of a chat or voice request
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transcription succeeded but produced no text
    #[error("no speech was recognized in the audio")]
    EmptyTranscript,

    /// The scoped audio file could not be written
    #[error("could not store audio: {0}")]
    Storage(#[source] std::io::Error),

    #[error("transcription failed: {0}")]
    Transcription(#[source] ProviderError),

    #[error("chat completion failed: {0}")]
    Completion(#[source] ProviderError),
}

impl HandlerError {
    /// Whether the caller is at fault (400-class)
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::EmptyTranscript)
    }
}
