//! Text chat endpoint

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};

use super::{ApiError, ApiState};
use crate::handlers::{ChatRequest, ChatResult};

/// Build chat router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new().route("/chat", post(chat)).with_state(state)
}

/// Answer a text message
async fn chat(
    State(state): State<Arc<ApiState>>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResult>, ApiError> {
    let Json(request) = request.map_err(|rejection| ApiError::Rejected {
        status: rejection.status(),
        detail: rejection.body_text(),
    })?;

    tracing::debug!(
        user_id = request.user_id.as_deref().unwrap_or("anonymous"),
        language = ?request.language,
        chars = request.message.chars().count(),
        "chat request"
    );

    let result = state.chat.handle(&request).await?;
    Ok(Json(result))
}
