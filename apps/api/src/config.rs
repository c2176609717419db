use anyhow::{anyhow, Context, Result};

use crate::layout::PaperSize;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_gateway_url: String,
    pub llm_gateway_key: String,
    pub llm_timeout_secs: u64,
    pub page_size: PaperSize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm_gateway_url: require_env("LLM_GATEWAY_URL")?,
            llm_gateway_key: require_env("LLM_GATEWAY_KEY")?,
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            page_size: std::env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "a4".to_string())
                .parse::<PaperSize>()
                .map_err(|e| anyhow!(e))
                .context("PAGE_SIZE must be 'a4' or 'letter'")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
