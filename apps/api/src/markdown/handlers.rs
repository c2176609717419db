//! Axum route handlers for markdown rendering.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::markdown::{parse, render_html, BlockNode};

#[derive(Debug, Deserialize)]
pub struct RenderMarkdownRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RenderMarkdownResponse {
    pub blocks: Vec<BlockNode>,
    pub html: String,
}

/// POST /api/v1/markdown/render
///
/// Parses free text into block nodes and returns both the node list and its HTML tree.
pub async fn handle_render_markdown(
    Json(request): Json<RenderMarkdownRequest>,
) -> Result<Json<RenderMarkdownResponse>, AppError> {
    let blocks = parse(&request.text);
    let html = render_html(&blocks);
    debug!(blocks = blocks.len(), "Rendered markdown");
    Ok(Json(RenderMarkdownResponse { blocks, html }))
}
