use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::resume::RecordError;

/// User-visible message for every external generation failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Generation failed. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rejected before any external call is made.
    #[error("Unknown request type: {0}")]
    UnknownRequestType(String),

    /// Any gateway failure: transport, non-2xx, rate limit, payment required, empty content.
    /// All of them are retryable by re-invoking.
    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RecordError> for AppError {
    fn from(e: RecordError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnknownRequestType(kind) => (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_REQUEST_TYPE",
                format!("Unknown request type '{kind}'"),
            ),
            AppError::Generation(e) => {
                tracing::warn!("Generation failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    format!("{GENERATION_FAILED_MESSAGE} ({})", e.user_hint()),
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
