//! Whisper provider for audio transcription

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::openai::upstream_message;
use super::{ProviderError, TranscriptionClient};
use crate::config::OpenAiConfig;
use crate::language::DEFAULT_LANGUAGE;

/// Whisper transcription client
pub struct WhisperTranscriptionClient {
    client: Client,
    api_key: SecretString,
    endpoint: String,
    model: String,
}

impl WhisperTranscriptionClient {
    /// Create a new Whisper client
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: &OpenAiConfig) -> crate::Result<Self> {
        let client = Client::builder().connect_timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: SecretString::from(config.api_key.expose_secret().to_string()),
            endpoint: format!("{}/audio/transcriptions", config.base_url),
            model: config.transcription_model.clone(),
        })
    }

    /// Get MIME type for a file extension
    fn mime_for_extension(extension: &str) -> &'static str {
        match extension.to_ascii_lowercase().as_str() {
            "mp3" | "mpeg" | "mpga" => "audio/mpeg",
            "wav" => "audio/wav",
            "m4a" | "mp4" => "audio/mp4",
            "ogg" | "oga" => "audio/ogg",
            "flac" => "audio/flac",
            _ => "audio/webm",
        }
    }
}

#[async_trait]
impl TranscriptionClient for WhisperTranscriptionClient {
    async fn transcribe(&self, audio: &Path, language: Option<&str>) -> Result<String, ProviderError> {
        let data = tokio::fs::read(audio).await?;
        tracing::debug!(audio_bytes = data.len(), "starting Whisper transcription");

        let extension = audio.extension().and_then(|e| e.to_str()).unwrap_or("webm");
        let filename = audio
            .file_name()
            .and_then(|n| n.to_str())
            .map_or_else(|| format!("audio.{extension}"), ToString::to_string);

        let part = Part::bytes(data)
            .file_name(filename)
            .mime_str(Self::mime_for_extension(extension))
            .map_err(|e| ProviderError::Request(format!("invalid MIME type: {e}")))?;

        let form = Form::new()
            .text("model", self.model.clone())
            .text("language", primary_subtag(language.unwrap_or(DEFAULT_LANGUAGE)))
            .part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: upstream_message(&body),
            });
        }

        let result: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        Ok(result.text.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "whisper"
    }
}

/// ISO-639-1 part of a language tag (`en-US` → `en`); the API rejects region tags
fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}
