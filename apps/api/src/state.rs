use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Backend for every LLM-backed stage. `LlmClient` in production.
    pub llm: Arc<dyn LanguageModel>,
    pub config: Config,
    pub retry: RetryPolicy,
}

impl AppState {
    pub fn new(llm: Arc<dyn LanguageModel>, config: Config) -> Self {
        let retry = config.retry_policy();
        Self { llm, config, retry }
    }
}
