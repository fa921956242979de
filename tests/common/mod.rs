//! Shared test utilities
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use aetherium_gateway::{
    CompletionClient, DetectionFailure, LanguageDetector, ProviderError, TranscriptionClient,
};
use async_trait::async_trait;

/// Completion double that records every call
pub struct StubCompletion {
    reply: Result<String, String>,
    calls: Mutex<Vec<CompletionCall>>,
}

#[derive(Debug, Clone)]
pub struct CompletionCall {
    pub system_prompt: String,
    pub user_text: String,
}

impl StubCompletion {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(answer.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(CompletionCall {
            system_prompt: system_prompt.to_string(),
            user_text: user_text.to_string(),
        });

        self.reply.clone().map_err(|body| ProviderError::Status { status: 500, body })
    }

    fn name(&self) -> &'static str {
        "stub-completion"
    }
}

/// Transcription double that inspects the audio file while it exists
pub struct StubTranscription {
    reply: Result<String, String>,
    calls: Mutex<Vec<TranscriptionCall>>,
}

#[derive(Debug, Clone)]
pub struct TranscriptionCall {
    pub path: PathBuf,
    pub existed: bool,
    pub contents: Vec<u8>,
    pub language: Option<String>,
}

impl StubTranscription {
    pub fn hearing(transcript: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(transcript.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<TranscriptionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptionClient for StubTranscription {
    async fn transcribe(&self, audio: &Path, language: Option<&str>) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(TranscriptionCall {
            path: audio.to_path_buf(),
            existed: audio.exists(),
            contents: std::fs::read(audio).unwrap_or_default(),
            language: language.map(ToString::to_string),
        });

        self.reply.clone().map_err(|body| ProviderError::Status { status: 502, body })
    }

    fn name(&self) -> &'static str {
        "stub-transcription"
    }
}

/// Detector double returning a fixed code, or failing when `None`
pub struct StubDetector {
    code: Option<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl StubDetector {
    pub fn detecting(code: &'static str) -> Arc<Self> {
        Arc::new(Self {
            code: Some(code),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn inconclusive() -> Arc<Self> {
        Arc::new(Self {
            code: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl LanguageDetector for StubDetector {
    fn detect(&self, text: &str) -> Result<String, DetectionFailure> {
        self.calls.lock().unwrap().push(text.to_string());
        self.code
            .map(ToString::to_string)
            .ok_or(DetectionFailure::Undetectable)
    }
}

/// Count entries left in a directory
pub fn entries_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(Iterator::count).unwrap_or(0)
}

pub const BOUNDARY: &str = "aetherium-test-boundary";

/// Minimal `multipart/form-data` body builder
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }
}
