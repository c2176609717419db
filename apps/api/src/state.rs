use std::sync::Arc;

use crate::layout::PageConfig;
use crate::llm_client::ContentGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation gateway. `LlmClient` in production; tests swap in a stub.
    pub gateway: Arc<dyn ContentGateway>,
    /// Page size, margins, and type sizes for the paginated export.
    pub page_config: PageConfig,
}
