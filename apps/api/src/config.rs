use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::ProviderConfig;

pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 20_000;

/// Application configuration loaded from environment variables.
/// Only malformed values are startup errors; every integration is optional.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider credential. `None` routes every request straight to the fallback.
    pub gemini_api_key: Option<String>,
    pub gemini_endpoint: String,
    pub provider_timeout_ms: u64,
    /// Enables quiz attempt persistence when present.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_endpoint: optional_env("GEMINI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            provider_timeout_ms: match optional_env("PROVIDER_TIMEOUT_MS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .context("PROVIDER_TIMEOUT_MS must be a whole number of milliseconds")?,
                None => DEFAULT_PROVIDER_TIMEOUT_MS,
            },
            database_url: optional_env("DATABASE_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The immutable slice of configuration handed to the provider client.
    pub fn provider(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.gemini_api_key.clone(),
            endpoint: self.gemini_endpoint.clone(),
            timeout: Duration::from_millis(self.provider_timeout_ms),
        }
    }
}

/// Reads an env var, treating unset and blank values the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
