use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::embedder::EmbedError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbedError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Multipart(msg) => (StatusCode::BAD_REQUEST, "MULTIPART_ERROR", msg.clone()),
            AppError::Embedding(e) => {
                tracing::error!("Embedding error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMBEDDING_ERROR",
                    "An embedding inference error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
