//! HTTP error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::handlers::HandlerError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// API errors
#[derive(Debug)]
pub enum ApiError {
    /// Orchestration failure
    Handler(HandlerError),
    /// Request body rejected before reaching a handler
    Rejected { status: StatusCode, detail: String },
}

impl ApiError {
    /// Status code sent to the caller
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Handler(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Handler(e) => e.to_string(),
            Self::Rejected { detail, .. } => detail.clone(),
        }
    }
}

impl From<HandlerError> for ApiError {
    fn from(e: HandlerError) -> Self {
        Self::Handler(e)
    }
}

impl From<crate::handlers::ValidationError> for ApiError {
    fn from(e: crate::handlers::ValidationError) -> Self {
        Self::Handler(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %detail, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), %detail, "request rejected");
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
