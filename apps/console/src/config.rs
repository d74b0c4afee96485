use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Console configuration loaded from environment variables (and `.env`
/// when present). Only the API base URL is required.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub state_dir: PathBuf,
    /// Scope recommendation cache keys per posting id instead of the
    /// original fixed keys. Off by default; see DESIGN.md.
    pub scoped_recommendation_cache: bool,
    pub http_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: require_env("MARKETPLACE_API_URL")?,
            state_dir: std::env::var("CONSOLE_STATE_DIR")
                .unwrap_or_else(|_| ".console-state".to_string())
                .into(),
            scoped_recommendation_cache: flag_env("SCOPED_RECOMMENDATION_CACHE"),
            http_timeout: Duration::from_secs(
                std::env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("HTTP_TIMEOUT_SECS must be a number of seconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn flag_env(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
