/// LLM gateway client — the single point of entry for all AI generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the gateway directly.
/// The gateway is a hosted function that owns prompting and model choice. This
/// client sends `{type, data}` and reads back `{content}`; it never retries.
/// Every failure is surfaced once and the caller decides whether to re-invoke.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::generation::GenerationKind;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited by gateway")]
    RateLimited,

    #[error("Gateway requires payment")]
    PaymentRequired,

    #[error("Gateway returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Short user-facing text. The only thing that tells failure causes apart.
    pub fn user_hint(&self) -> &'static str {
        match self {
            LlmError::RateLimited => "Too many requests, wait a moment",
            LlmError::PaymentRequired => "AI credits are exhausted",
            LlmError::EmptyContent => "No content was returned",
            LlmError::Http(_) => "The AI service could not be reached",
            LlmError::Api { .. } | LlmError::Parse(_) => "The AI service returned an error",
        }
    }
}

#[derive(Debug, Serialize)]
struct GatewayRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    data: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    content: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: String,
}

/// Anything that can turn a generation request into plain text.
/// `LlmClient` is the production implementation; tests inject stubs.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    async fn generate(&self, kind: GenerationKind, data: &Value) -> Result<String, LlmError>;
}

/// HTTP client for the hosted generation gateway.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentGateway for LlmClient {
    async fn generate(&self, kind: GenerationKind, data: &Value) -> Result<String, LlmError> {
        let request_body = GatewayRequest {
            kind: kind.as_str(),
            data,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Gateway returned {} for {}: {}", status, kind.as_str(), body);
            return Err(classify_failure(status.as_u16(), &body));
        }

        let content = extract_content(&body)?;
        debug!(
            kind = kind.as_str(),
            chars = content.len(),
            "Gateway call succeeded"
        );
        Ok(content)
    }
}

/// Maps a non-2xx gateway response to an error. 429 and 402 get their own variants;
/// anything else carries the gateway's `{"error": "..."}` message or the raw body.
pub(crate) fn classify_failure(status: u16, body: &str) -> LlmError {
    match status {
        429 => LlmError::RateLimited,
        402 => LlmError::PaymentRequired,
        _ => {
            let message = serde_json::from_str::<GatewayErrorBody>(body)
                .map(|e| e.error)
                .unwrap_or_else(|_| body.to_string());
            LlmError::Api { status, message }
        }
    }
}

/// Reads `{content}` from a 2xx body. An embedded `error` field or empty content
/// is a failure: nothing partial may reach the renderers.
pub(crate) fn extract_content(body: &str) -> Result<String, LlmError> {
    let parsed: GatewayResponse = serde_json::from_str(body)?;
    if let Some(message) = parsed.error {
        return Err(LlmError::Api {
            status: 200,
            message,
        });
    }
    match parsed.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(LlmError::EmptyContent),
    }
}
