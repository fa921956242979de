//! Error types for the Aetherium gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the gateway
///
/// Request-scoped failures live in [`crate::handlers::HandlerError`];
/// this type covers process-level concerns only.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// API server failed to bind or serve
    #[error("server error: {0}")]
    Server(String),
}
