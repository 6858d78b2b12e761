use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::retry::RetryPolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_ms: u64,
    pub llm_retry_attempts: u32,
    pub llm_retry_delay_ms: u64,
    pub max_upload_mb: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_ms: env_or("LLM_TIMEOUT_MS", 30_000)?,
            llm_retry_attempts: env_or("LLM_RETRY_ATTEMPTS", 3)?,
            llm_retry_delay_ms: env_or("LLM_RETRY_DELAY_MS", 1_000)?,
            max_upload_mb: env_or("MAX_UPLOAD_MB", 50)?,
        })
    }

    /// Retry and timeout settings shared by every LLM-backed stage.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.llm_retry_attempts.max(1),
            initial_delay: Duration::from_millis(self.llm_retry_delay_ms),
            timeout: Duration::from_millis(self.llm_timeout_ms),
        }
    }

    /// Saturates instead of overflowing for absurd `MAX_UPLOAD_MB` values.
    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_mb)
            .unwrap_or(usize::MAX)
            .saturating_mul(1024 * 1024)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            llm_timeout_ms: 30_000,
            llm_retry_attempts: 3,
            llm_retry_delay_ms: 1_000,
            max_upload_mb: 50,
        }
    }
}
