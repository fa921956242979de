//! Voice-to-chat endpoint

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Query, State,
        multipart::{Field, MultipartError, MultipartRejection},
        rejection::QueryRejection,
    },
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;

use super::{ApiError, ApiState};
use crate::handlers::{AudioFormat, ValidationError, VoiceResult, VoiceUpload};

/// Room for multipart framing and the `language` field on top of the audio
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build voice router
pub fn router(state: Arc<ApiState>) -> Router {
    let body_limit = state.voice.upload_limit().saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/voice", post(voice).layer(DefaultBodyLimit::max(body_limit)))
        .with_state(state)
}

/// Optional query parameters
#[derive(Debug, Default, Deserialize)]
pub struct VoiceQuery {
    pub language: Option<String>,
}

/// Transcribe an uploaded clip and answer it
///
/// Expects a multipart `file` part and an optional `language` part; the
/// language may also be given as `?language=`.
async fn voice(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<VoiceQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VoiceResult>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::Rejected {
        status: rejection.status(),
        detail: rejection.body_text(),
    })?;
    let mut multipart = multipart.map_err(|rejection| ApiError::Rejected {
        status: rejection.status(),
        detail: rejection.body_text(),
    })?;

    let limit = state.voice.upload_limit();
    let mut audio: Option<(Vec<u8>, String, String)> = None;
    let mut language = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(&e, limit))? {
        match field.name() {
            Some("file") => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if AudioFormat::from_content_type(&content_type).is_none() {
                    return Err(ValidationError::UnsupportedMediaType(content_type).into());
                }

                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = read_capped(field, limit).await?;
                let oversized = bytes.len() > limit;

                audio = Some((bytes, content_type, filename));

                // Leave the rest of the body unread; the handler rejects it
                if oversized {
                    break;
                }
            }
            Some("language") => {
                let value = field.text().await.map_err(|e| multipart_error(&e, limit))?;
                if !value.trim().is_empty() {
                    language = Some(value);
                }
            }
            _ => {}
        }
    }

    let (bytes, content_type, filename) = audio.ok_or(ValidationError::MissingFile)?;

    tracing::debug!(
        audio_bytes = bytes.len(),
        content_type = %content_type,
        filename = %filename,
        "voice request"
    );

    let upload = VoiceUpload {
        bytes,
        content_type,
        filename,
        language: language.or(query.language),
    };

    let result = state.voice.handle(upload).await?;
    Ok(Json(result))
}

/// Read a field, stopping as soon as it grows past `limit`
async fn read_capped(mut field: Field<'_>, limit: usize) -> Result<Vec<u8>, ApiError> {
    let mut buf = Vec::new();

    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(&e, limit))? {
        buf.extend_from_slice(&chunk);
        if buf.len() > limit {
            break;
        }
    }

    Ok(buf)
}

fn multipart_error(e: &MultipartError, limit: usize) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ValidationError::PayloadTooLarge { limit }.into();
    }

    ApiError::Rejected {
        status: StatusCode::BAD_REQUEST,
        detail: e.body_text(),
    }
}
