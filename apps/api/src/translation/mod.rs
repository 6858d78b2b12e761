//! Translation of extracted job-offer text into English.

pub mod handlers;
pub mod prompts;

use std::time::Instant;

use axum::http::StatusCode;
use serde::Serialize;
use tracing::{error, info};

use crate::llm_client::retry::{complete_with_retry, RetryPolicy};
use crate::llm_client::LanguageModel;
use crate::pipeline::failure::FailureKind;
use crate::pipeline::validation::{check_length, check_meaningful, TextLimits};
use crate::pipeline::{elapsed_ms, StageError};

const SERVICE: &str = "Translation";

pub const TRANSLATION_LIMITS: TextLimits = TextLimits {
    min_chars: 1,
    max_chars: 50_000,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationMetadata {
    pub original_length: usize,
    pub translated_length: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: TranslationMetadata,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl TranslationResult {
    pub fn status_code(&self) -> StatusCode {
        self.failure.map_or(StatusCode::OK, FailureKind::status_code)
    }
}

/// Translates `text` into English. Input is validated before any model call;
/// every failure is reported in the result rather than returned as an error.
pub async fn translate_extracted_text(
    text: &str,
    llm: &dyn LanguageModel,
    retry: &RetryPolicy,
) -> TranslationResult {
    let started = Instant::now();

    match translate(text, llm, retry).await {
        Ok((original_length, translated)) => {
            let processing_time_ms = elapsed_ms(started);
            info!(
                original_length,
                translated_length = translated.chars().count(),
                processing_time_ms,
                "Translation completed"
            );
            TranslationResult {
                success: true,
                metadata: TranslationMetadata {
                    original_length,
                    translated_length: translated.chars().count(),
                    processing_time_ms,
                },
                translated_text: Some(translated),
                error: None,
                failure: None,
            }
        }
        Err(e) => {
            let processing_time_ms = elapsed_ms(started);
            error!(
                text_length = text.chars().count(),
                processing_time_ms,
                "Translation failed: {e}"
            );
            TranslationResult {
                success: false,
                translated_text: None,
                error: Some(e.user_message(SERVICE)),
                metadata: TranslationMetadata {
                    original_length: text.chars().count(),
                    translated_length: 0,
                    processing_time_ms,
                },
                failure: Some(e.kind()),
            }
        }
    }
}

async fn translate(
    text: &str,
    llm: &dyn LanguageModel,
    retry: &RetryPolicy,
) -> Result<(usize, String), StageError> {
    check_length(text, TRANSLATION_LIMITS)?;
    check_meaningful(text)?;

    let cleaned = text.trim();
    let original_length = cleaned.chars().count();
    info!(original_length, "Starting translation");

    let reply = complete_with_retry(llm, retry, SERVICE, prompts::TRANSLATOR_SYSTEM, cleaned).await?;
    let translated = reply.trim();
    if translated.is_empty() {
        return Err(StageError::Response(
            "Translation resulted in empty text".to_string(),
        ));
    }

    Ok((original_length, translated.to_string()))
}
