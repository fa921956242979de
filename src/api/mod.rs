//! HTTP API server for the Aetherium gateway

pub mod chat;
pub mod error;
pub mod health;
pub mod voice;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

use crate::config::ServerConfig;
use crate::handlers::{ChatHandler, VoiceHandler};
use crate::language::LanguageDetector;
use crate::providers::{CompletionClient, TranscriptionClient};
use crate::Result;

/// Shared state for API handlers
pub struct ApiState {
    pub chat: ChatHandler,
    pub voice: VoiceHandler,
}

/// Configuration for building an API server
pub struct ApiServerBuilder {
    completion: Arc<dyn CompletionClient>,
    transcription: Arc<dyn TranscriptionClient>,
    detector: Arc<dyn LanguageDetector>,
    host: String,
    port: u16,
    server: ServerConfig,
}

impl ApiServerBuilder {
    /// Create a new API server builder
    #[must_use]
    pub fn new(
        completion: Arc<dyn CompletionClient>,
        transcription: Arc<dyn TranscriptionClient>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        Self {
            completion,
            transcription,
            detector,
            host: "0.0.0.0".to_string(),
            port: 8000,
            server: ServerConfig::default(),
        }
    }

    /// Set the bind host
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the bind port
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set static files, upload limit and temp dir from `ServerConfig`
    #[must_use]
    pub fn server_config(mut self, config: ServerConfig) -> Self {
        self.server = config;
        self
    }

    /// Set the static files directory mounted at `/static`
    #[must_use]
    pub fn static_dir(mut self, dir: PathBuf) -> Self {
        self.server.static_dir = dir;
        self
    }

    /// Set the landing page served at `/`
    #[must_use]
    pub fn index_file(mut self, file: PathBuf) -> Self {
        self.server.index_file = file;
        self
    }

    /// Set the voice upload limit in bytes
    #[must_use]
    pub const fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.server.max_upload_bytes = limit;
        self
    }

    /// Set the directory for scoped audio files
    #[must_use]
    pub fn temp_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.server.temp_dir = dir;
        self
    }

    /// Build the API server
    #[must_use]
    pub fn build(self) -> ApiServer {
        let chat = ChatHandler::new(self.completion.clone(), self.detector.clone());
        let voice = VoiceHandler::new(self.transcription, self.completion, self.detector)
            .max_upload_bytes(self.server.max_upload_bytes)
            .temp_dir(self.server.temp_dir.clone());

        ApiServer {
            state: Arc::new(ApiState { chat, voice }),
            host: self.host,
            port: self.port,
            static_dir: self.server.static_dir,
            index_file: self.server.index_file,
        }
    }
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    host: String,
    port: u16,
    static_dir: PathBuf,
    index_file: PathBuf,
}

impl ApiServer {
    /// Build the router with all routes
    #[must_use]
    pub fn router(&self) -> Router {
        let router = Router::new()
            .merge(health::router())
            .merge(chat::router(self.state.clone()))
            .merge(voice::router(self.state.clone()))
            .route_service("/", ServeFile::new(&self.index_file))
            .nest_service("/static", ServeDir::new(&self.static_dir));

        // CORS layer for cross-origin requests from frontend
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        router.layer(cors).layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Server(format!("failed to bind {addr}: {e}")))?;

        let local: Option<SocketAddr> = listener.local_addr().ok();
        tracing::info!(
            addr = %local.map_or(addr, |a| a.to_string()),
            static_dir = %self.static_dir.display(),
            "API server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| crate::Error::Server(format!("API server error: {e}")))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
