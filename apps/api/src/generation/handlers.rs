//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::generation::{generate_content, GeneratedContent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// POST /api/v1/ai/generate
///
/// Sends `{type, data}` to the gateway and returns the content with its parsed
/// blocks and HTML. Unknown types are rejected before any external call.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedContent>, AppError> {
    let generated = generate_content(state.gateway.as_ref(), &request.kind, &request.data).await?;
    Ok(Json(generated))
}
