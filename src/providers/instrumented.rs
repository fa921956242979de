//! Timeout and logging wrapper around provider calls

use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::{CompletionClient, ProviderError, TranscriptionClient};

/// Wraps a provider so every call is bounded and logged
///
/// Keeps telemetry out of the handlers: they see the same trait, and
/// the wrapper is applied once when the server is assembled.
pub struct Instrumented<C> {
    inner: C,
    timeout: Duration,
}

impl<C> Instrumented<C> {
    #[must_use]
    pub const fn new(inner: C, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn observe<T, F>(&self, provider: &'static str, operation: &'static str, call: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>> + Send,
    {
        let started = Instant::now();
        tracing::debug!(provider, operation, "calling provider");

        let result = tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(ProviderError::Timeout(self.timeout)));

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(_) => tracing::info!(provider, operation, elapsed_ms, "provider call complete"),
            Err(e) => tracing::error!(provider, operation, elapsed_ms, error = %e, "provider call failed"),
        }

        result
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for Instrumented<C> {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, ProviderError> {
        self.observe(
            self.inner.name(),
            "complete",
            self.inner.complete(system_prompt, user_text),
        )
        .await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[async_trait]
impl<C: TranscriptionClient> TranscriptionClient for Instrumented<C> {
    async fn transcribe(&self, audio: &Path, language: Option<&str>) -> Result<String, ProviderError> {
        self.observe(
            self.inner.name(),
            "transcribe",
            self.inner.transcribe(audio, language),
        )
        .await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
