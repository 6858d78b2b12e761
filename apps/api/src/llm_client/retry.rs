//! Retry with exponential backoff, bounded by an overall timeout.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::{LanguageModel, LlmError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub attempts: u32,
    /// Delay after the first failed attempt; doubles on each further failure.
    pub initial_delay: Duration,
    /// Upper bound on the whole retry loop, backoff sleeps included.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_delay: Duration::from_millis(1000),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the 1-based `attempt` failed: 1s, 2s, 4s, ...
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(1u32 << exponent)
    }
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is spent. The last error is returned on exhaustion.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() || attempt >= policy.attempts => return Err(e),
            Err(e) => {
                let delay = policy.backoff_delay(attempt);
                warn!(
                    "{} attempt {} failed, retrying in {}ms: {}",
                    label,
                    attempt,
                    delay.as_millis(),
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// One LLM completion with retry/backoff, raced against `policy.timeout`.
pub async fn complete_with_retry(
    llm: &dyn LanguageModel,
    policy: &RetryPolicy,
    label: &str,
    system: &str,
    prompt: &str,
) -> Result<String, LlmError> {
    let attempts = retry_with_backoff(policy, label, || llm.complete(system, prompt));
    match tokio::time::timeout(policy.timeout, attempts).await {
        Ok(result) => result,
        Err(_) => Err(LlmError::Timeout {
            after_ms: policy.timeout.as_millis() as u64,
        }),
    }
}
