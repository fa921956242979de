//! Text chat: language → prompt → completion

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{HandlerError, ValidationError};
use crate::language::{LanguageDetector, resolve_language};
use crate::prompt::system_prompt_for;
use crate::providers::CompletionClient;

/// Incoming chat message
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Accepted for client compatibility; only recorded in logs
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Chat answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResult {
    pub answer: String,
}

/// Orchestrates the text chat endpoint
#[derive(Clone)]
pub struct ChatHandler {
    completion: Arc<dyn CompletionClient>,
    detector: Arc<dyn LanguageDetector>,
}

impl ChatHandler {
    #[must_use]
    pub fn new(completion: Arc<dyn CompletionClient>, detector: Arc<dyn LanguageDetector>) -> Self {
        Self { completion, detector }
    }

    /// Answer a chat message
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMessage`] for a blank message and
    /// [`HandlerError::Completion`] if the provider fails
    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatResult, HandlerError> {
        if request.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        let language = resolve_language(
            request.language.as_deref(),
            &request.message,
            self.detector.as_ref(),
        );

        let answer = self
            .completion
            .complete(system_prompt_for(&language.code), &request.message)
            .await
            .map_err(HandlerError::Completion)?;

        Ok(ChatResult { answer })
    }
}
