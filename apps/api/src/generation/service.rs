//! Generation pipeline: validate the request, call the gateway once, and only on
//! success hand the text to the markdown renderer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::kind::{GenerationKind, UnknownKind};
use crate::llm_client::ContentGateway;
use crate::markdown::{parse, render_html, BlockNode};

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedContent {
    pub id: Uuid,
    pub kind: GenerationKind,
    pub content: String,
    pub blocks: Vec<BlockNode>,
    pub html: String,
    pub generated_at: DateTime<Utc>,
}

/// Runs one generation request.
///
/// An unknown `kind` or a non-object `data` is rejected before the gateway is
/// touched. Gateway failures surface as `AppError::Generation`; no partial text
/// reaches the parser.
pub async fn generate_content(
    gateway: &dyn ContentGateway,
    kind: &str,
    data: &Value,
) -> Result<GeneratedContent, AppError> {
    let kind: GenerationKind = kind
        .parse()
        .map_err(|UnknownKind(kind)| AppError::UnknownRequestType(kind))?;

    if !data.is_object() {
        return Err(AppError::Validation("data must be a JSON object".to_string()));
    }

    let content = gateway.generate(kind, data).await?;

    let blocks = parse(&content);
    let html = render_html(&blocks);

    info!(
        kind = kind.as_str(),
        blocks = blocks.len(),
        "Generated content"
    );

    Ok(GeneratedContent {
        id: Uuid::new_v4(),
        kind,
        content,
        blocks,
        html,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::llm_client::LlmError;

    pub(crate) const LETTER: &str = "# Cover Letter\n\nDear **team**,\n- one\n- two";

    type Reply = Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>;

    /// Gateway double that counts calls and replays one canned outcome.
    pub(crate) struct StubGateway {
        calls: AtomicUsize,
        reply: Reply,
    }

    impl StubGateway {
        pub(crate) fn replying(content: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Box::new(move || Ok(content.to_string())),
            }
        }

        pub(crate) fn failing(make_error: fn() -> LlmError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Box::new(move || Err(make_error())),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentGateway for StubGateway {
        async fn generate(&self, _kind: GenerationKind, _data: &Value) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    #[tokio::test]
    async fn test_success_parses_content() {
        let gateway = StubGateway::replying(LETTER);
        let out = generate_content(&gateway, "cover_letter", &json!({"jobTitle": "Engineer"}))
            .await
            .unwrap();

        assert_eq!(gateway.call_count(), 1);
        assert_eq!(out.kind, GenerationKind::CoverLetter);
        assert_eq!(
            out.blocks[0],
            BlockNode::Heading {
                level: 1,
                text: "Cover Letter".to_string()
            }
        );
        assert!(out.html.contains("<strong>team</strong>"));
        assert!(out.html.contains("<ul><li>one</li><li>two</li></ul>"));
    }

    #[tokio::test]
    async fn test_unknown_kind_makes_no_call() {
        let gateway = StubGateway::replying(LETTER);
        let err = generate_content(&gateway, "poetry", &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnknownRequestType(ref k) if k == "poetry"));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_object_data_makes_no_call() {
        let gateway = StubGateway::replying(LETTER);
        let err = generate_content(&gateway, "salary", &json!("senior engineer"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_generation_error() {
        for make_error in [
            (|| LlmError::RateLimited) as fn() -> LlmError,
            || LlmError::PaymentRequired,
            || LlmError::EmptyContent,
        ] {
            let gateway = StubGateway::failing(make_error);
            let err = generate_content(&gateway, "interview", &json!({}))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Generation(_)));
            assert_eq!(gateway.call_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let gateway = StubGateway::replying(LETTER);
        let a = generate_content(&gateway, "resume", &json!({})).await.unwrap();
        let b = generate_content(&gateway, "resume", &json!({})).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
