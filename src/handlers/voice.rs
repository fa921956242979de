//! Voice chat: validate → store → transcribe → language → prompt → completion

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tempfile::NamedTempFile;

use super::{HandlerError, ValidationError};
use crate::config::MAX_UPLOAD_BYTES;
use crate::language::{LanguageDetector, resolve_language};
use crate::prompt::system_prompt_for;
use crate::providers::{CompletionClient, TranscriptionClient};

/// Suffix for uploads without a usable extension
const DEFAULT_SUFFIX: &str = ".webm";

/// Accepted audio content types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Webm,
    Mp3,
    Wav,
    Mpeg,
}

impl AudioFormat {
    /// Match a declared content type, ignoring parameters and case
    ///
    /// `audio/webm;codecs=opus` matches [`AudioFormat::Webm`].
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or_default().trim();

        match essence.to_ascii_lowercase().as_str() {
            "audio/webm" => Some(Self::Webm),
            "audio/mp3" => Some(Self::Mp3),
            "audio/wav" => Some(Self::Wav),
            "audio/mpeg" => Some(Self::Mpeg),
            _ => None,
        }
    }
}

/// Audio received on the voice endpoint
#[derive(Debug, Clone)]
pub struct VoiceUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
    pub language: Option<String>,
}

impl VoiceUpload {
    /// Temp-file suffix taken from the original filename
    fn suffix(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map_or_else(|| DEFAULT_SUFFIX.to_string(), |e| format!(".{e}"))
    }
}

/// Transcript and answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceResult {
    pub transcript: String,
    pub answer: String,
}

/// Audio file that exists only for the duration of one request
///
/// Removed by [`ScopedAudioFile::close`]; if the owner unwinds instead,
/// the inner `NamedTempFile` removes it on drop.
#[derive(Debug)]
pub struct ScopedAudioFile {
    file: NamedTempFile,
}

impl ScopedAudioFile {
    /// Write `bytes` to a uniquely named file in `dir` (OS temp dir if `None`)
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or written
    pub fn create(dir: Option<&Path>, suffix: &str, bytes: &[u8]) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("voice-").suffix(suffix);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self { file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file; failure is logged and otherwise ignored
    pub fn close(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove audio file");
        }
    }
}

/// Orchestrates the voice endpoint
#[derive(Clone)]
pub struct VoiceHandler {
    transcription: Arc<dyn TranscriptionClient>,
    completion: Arc<dyn CompletionClient>,
    detector: Arc<dyn LanguageDetector>,
    max_upload_bytes: usize,
    temp_dir: Option<PathBuf>,
}

impl VoiceHandler {
    #[must_use]
    pub fn new(
        transcription: Arc<dyn TranscriptionClient>,
        completion: Arc<dyn CompletionClient>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        Self {
            transcription,
            completion,
            detector,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            temp_dir: None,
        }
    }

    /// Override the upload size limit
    #[must_use]
    pub const fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// Store audio files under `dir` instead of the OS temp dir
    #[must_use]
    pub fn temp_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.temp_dir = dir;
        self
    }

    /// Size limit in bytes
    #[must_use]
    pub const fn upload_limit(&self) -> usize {
        self.max_upload_bytes
    }

    /// Transcribe an upload and answer it
    ///
    /// The stored audio file is removed on every path once transcription
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unsupported or oversized audio,
    /// [`HandlerError::EmptyTranscript`] when nothing was recognized, and a
    /// provider error if transcription or completion fails
    pub async fn handle(&self, upload: VoiceUpload) -> Result<VoiceResult, HandlerError> {
        if AudioFormat::from_content_type(&upload.content_type).is_none() {
            return Err(ValidationError::UnsupportedMediaType(upload.content_type).into());
        }

        if upload.bytes.len() > self.max_upload_bytes {
            return Err(ValidationError::PayloadTooLarge {
                limit: self.max_upload_bytes,
            }
            .into());
        }

        let hint = upload
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());

        let audio = ScopedAudioFile::create(self.temp_dir.as_deref(), &upload.suffix(), &upload.bytes)
            .map_err(HandlerError::Storage)?;
        drop(upload.bytes);

        let transcribed = self.transcription.transcribe(audio.path(), hint).await;
        audio.close();

        let transcript = transcribed
            .map_err(HandlerError::Transcription)?
            .trim()
            .to_string();
        if transcript.is_empty() {
            return Err(HandlerError::EmptyTranscript);
        }

        let language = resolve_language(hint, &transcript, self.detector.as_ref());

        let answer = self
            .completion
            .complete(system_prompt_for(&language.code), &transcript)
            .await
            .map_err(HandlerError::Completion)?;

        Ok(VoiceResult { transcript, answer })
    }
}
