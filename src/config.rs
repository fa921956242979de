//! Configuration management for the Aetherium gateway

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::{Error, Result};

/// Default `OpenAI`-compatible API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat-completion model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default transcription model
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Default bound on each outbound provider call
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Largest accepted voice upload (25 MiB)
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Gateway configuration
#[derive(Debug)]
pub struct Config {
    /// Provider configuration
    pub openai: OpenAiConfig,

    /// HTTP surface configuration
    pub server: ServerConfig,
}

/// Provider credentials, endpoints and models
#[derive(Debug)]
pub struct OpenAiConfig {
    /// API key (from `OPENAI_API_KEY`, required)
    pub api_key: SecretString,

    /// API root, without trailing slash
    pub base_url: String,

    /// Chat-completion model identifier
    pub chat_model: String,

    /// Transcription model identifier
    pub transcription_model: String,

    /// Upper bound for every provider call
    pub timeout: Duration,
}

/// HTTP surface configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory mounted at `/static`
    pub static_dir: PathBuf,

    /// Landing page served at `/`
    pub index_file: PathBuf,

    /// Maximum accepted voice upload in bytes
    pub max_upload_bytes: usize,

    /// Directory for scoped audio files (OS temp dir when unset)
    pub temp_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if `OPENAI_API_KEY` is missing or a value fails to parse
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns error if `OPENAI_API_KEY` is missing or a value fails to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Refuse to start without a credential; there is no fallback key
        let api_key = var("OPENAI_API_KEY")
            .map(|key| SecretString::from(key.trim().to_string()))
            .ok_or_else(|| Error::Config("OPENAI_API_KEY is not set".to_string()))?;

        let timeout = match var("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_PROVIDER_TIMEOUT,
        };

        let openai = OpenAiConfig {
            api_key,
            base_url: var("OPENAI_BASE_URL")
                .map_or_else(|| DEFAULT_BASE_URL.to_string(), |url| url.trim_end_matches('/').to_string()),
            chat_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            transcription_model: var("OPENAI_TRANSCRIPTION_MODEL")
                .unwrap_or_else(|| DEFAULT_TRANSCRIPTION_MODEL.to_string()),
            timeout,
        };

        let server = ServerConfig {
            static_dir: var("STATIC_DIR").map_or_else(|| PathBuf::from("static"), PathBuf::from),
            index_file: var("INDEX_FILE").map_or_else(|| PathBuf::from("index.html"), PathBuf::from),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            temp_dir: var("AUDIO_TEMP_DIR").map(PathBuf::from),
        };

        Ok(Self { openai, server })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            index_file: PathBuf::from("index.html"),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            temp_dir: None,
        }
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::Config(format!(
            "PROVIDER_TIMEOUT_SECS must be a positive integer, got {raw:?}"
        ))),
    }
}
