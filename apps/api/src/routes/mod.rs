pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::markdown::handlers as markdown;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Markdown API
        .route(
            "/api/v1/markdown/render",
            post(markdown::handle_render_markdown),
        )
        // Resume API
        .route("/api/v1/resume/template", get(render::handle_template))
        .route("/api/v1/resume/entries", post(render::handle_edit_entries))
        .route("/api/v1/resume/preview", post(render::handle_preview))
        .route("/api/v1/resume/export/pdf", post(render::handle_export_pdf))
        .route(
            "/api/v1/resume/export/docx",
            post(render::handle_export_docx),
        )
        // AI API
        .route("/api/v1/ai/generate", post(generation::handle_generate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::service::tests::{StubGateway, LETTER};
    use crate::layout::{default_page_config, PaperSize};
    use crate::llm_client::LlmError;

    fn app_with(gateway: Arc<StubGateway>) -> Router {
        build_router(AppState {
            gateway,
            page_config: default_page_config(PaperSize::A4),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn sample_record() -> Value {
        json!({
            "personalInfo": {"name": "Ada Lovelace", "email": "ada@example.com"},
            "summary": "Analyst of engines.",
            "experiences": [{"company": "Analytical Engine", "position": "Programmer"}]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["service"], "jobboard-api");
    }

    #[tokio::test]
    async fn test_markdown_render_route() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let (status, body) = post_json(
            app,
            "/api/v1/markdown/render",
            json!({"text": "## Tips\n1. Prepare"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blocks"][0]["type"], "heading");
        assert_eq!(body["blocks"][1]["type"], "ordered_list");
        assert_eq!(body["html"], "<h2>Tips</h2>\n<ol><li>Prepare</li></ol>");
    }

    #[tokio::test]
    async fn test_template_route() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let request = Request::builder()
            .uri("/api/v1/resume/template")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        for collection in ["experiences", "educations", "projects"] {
            assert_eq!(body[collection].as_array().unwrap().len(), 1, "{collection}");
        }
    }

    #[tokio::test]
    async fn test_entries_route_add_then_remove() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let (status, added) = post_json(
            app.clone(),
            "/api/v1/resume/entries",
            json!({"record": sample_record(), "kind": "experience", "action": "add"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(added["entryCount"], 2);
        assert_eq!(added["changed"], true);

        let (status, removed) = post_json(
            app,
            "/api/v1/resume/entries",
            json!({
                "record": added["record"],
                "kind": "experience",
                "action": "remove",
                "index": 0
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["entryCount"], 1);
        assert_eq!(removed["record"]["experiences"][0]["company"], "");
    }

    #[tokio::test]
    async fn test_entries_route_removing_only_entry_does_nothing() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let (status, body) = post_json(
            app,
            "/api/v1/resume/entries",
            json!({"record": sample_record(), "kind": "experience", "action": "remove", "index": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], false);
        assert_eq!(body["entryCount"], 1);
        assert_eq!(
            body["record"]["experiences"][0]["company"],
            "Analytical Engine"
        );
    }

    #[tokio::test]
    async fn test_entries_route_out_of_range_index() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let (status, body) = post_json(
            app,
            "/api/v1/resume/entries",
            json!({"record": sample_record(), "kind": "project", "action": "remove", "index": 4}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_entries_route_update() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let (status, body) = post_json(
            app,
            "/api/v1/resume/entries",
            json!({
                "kind": "education",
                "action": "update",
                "index": 0,
                "entry": {"degree": "BSc Mathematics", "institution": "Cambridge"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["record"]["educations"][0]["institution"], "Cambridge");
    }

    #[tokio::test]
    async fn test_preview_route() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let (status, body) = post_json(app, "/api/v1/resume/preview", sample_record()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["node"], "document");
        assert_eq!(body["children"][0]["name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_pdf_export_route() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let (status, body) = post_json(app, "/api/v1/resume/export/pdf", sample_record()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["file_name"], "Ada_Lovelace_Resume.pdf");
        assert_eq!(body["pages"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_export_requires_name() {
        for uri in ["/api/v1/resume/export/pdf", "/api/v1/resume/export/docx"] {
            let app = app_with(Arc::new(StubGateway::replying(LETTER)));
            let (status, body) = post_json(app, uri, json!({"summary": "No name"})).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_docx_export_route() {
        let app = app_with(Arc::new(StubGateway::replying(LETTER)));
        let (status, body) = post_json(app, "/api/v1/resume/export/docx", sample_record()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["file_name"], "Ada_Lovelace_Resume.docx");
        assert_eq!(body["blocks"][0]["kind"], "title");
    }

    #[tokio::test]
    async fn test_generate_route_success() {
        let gateway = Arc::new(StubGateway::replying(LETTER));
        let (status, body) = post_json(
            app_with(gateway.clone()),
            "/api/v1/ai/generate",
            json!({"type": "cover_letter", "data": {"jobTitle": "Engineer"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(gateway.call_count(), 1);
        assert_eq!(body["kind"], "cover_letter");
        assert_eq!(body["content"], LETTER);
        assert_eq!(body["blocks"][0]["type"], "heading");
    }

    #[tokio::test]
    async fn test_generate_route_unknown_type() {
        let gateway = Arc::new(StubGateway::replying(LETTER));
        let (status, body) = post_json(
            app_with(gateway.clone()),
            "/api/v1/ai/generate",
            json!({"type": "poetry", "data": {}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNKNOWN_REQUEST_TYPE");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_route_gateway_failure() {
        let gateway = Arc::new(StubGateway::failing(|| LlmError::PaymentRequired));
        let (status, body) = post_json(
            app_with(gateway),
            "/api/v1/ai/generate",
            json!({"type": "salary", "data": {"role": "SRE"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Generation failed. Please try again."));
    }
}
