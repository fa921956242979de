//! `OpenAI` chat-completion provider

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{CompletionClient, ProviderError};
use crate::config::OpenAiConfig;

/// Output length cap for every answer
pub const MAX_OUTPUT_TOKENS: u32 = 800;

/// Sampling temperature (most likely output)
pub const TEMPERATURE: f32 = 0.0;

/// Chat-completion client for `OpenAI`-compatible APIs
pub struct OpenAiCompletionClient {
    client: Client,
    api_key: SecretString,
    endpoint: String,
    model: String,
}

impl OpenAiCompletionClient {
    /// Create a new completion client
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: &OpenAiConfig) -> crate::Result<Self> {
        let client = Client::builder().connect_timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: SecretString::from(config.api_key.expose_secret().to_string()),
            endpoint: format!("{}/chat/completions", config.base_url),
            model: config.chat_model.clone(),
        })
    }

    /// Model identifier sent with each request
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_text,
                },
            ],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
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

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| ProviderError::Malformed("response carried no message content".to_string()))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Pull `error.message` out of an `OpenAI` error body, falling back to the raw body
pub(crate) fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
