//! Aetherium Gateway - chat and voice-to-chat backend
//!
//! This library provides the request orchestration for a Dominican tax and
//! law assistant:
//! - Text chat answered by a chat-completion provider
//! - Voice chat transcribed by a speech-to-text provider, then answered
//! - Language detection and Spanish/English prompt selection
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    HTTP (axum)                      │
//! │   /health  │  /chat  │  /voice  │  /  │  /static    │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                    Handlers                          │
//! │   ChatHandler  │  VoiceHandler (scoped audio file)  │
//! │   LanguageDetector  │  PromptLanguage               │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │         Providers (timeout + logging wrapper)        │
//! │   Chat completions  │  Whisper transcription        │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod language;
pub mod prompt;
pub mod providers;

pub use api::{ApiServer, ApiServerBuilder, ApiState};
pub use config::Config;
pub use error::{Error, Result};
pub use handlers::{
    ChatHandler, ChatRequest, ChatResult, HandlerError, ValidationError, VoiceHandler,
    VoiceResult, VoiceUpload,
};
pub use language::{DEFAULT_LANGUAGE, DetectionFailure, LanguageDetector, WhatlangDetector};
pub use prompt::{PromptLanguage, system_prompt_for};
pub use providers::{
    CompletionClient, Instrumented, OpenAiCompletionClient, ProviderError, TranscriptionClient,
    WhisperTranscriptionClient,
};
