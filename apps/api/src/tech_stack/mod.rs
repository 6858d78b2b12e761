//! Tech-stack extraction from formatted job offers.
//!
//! One model call produces a categorized `ExtractedTechStack`. When the reply
//! has no parseable JSON, `heuristics` recovers a profile from the reply and
//! the source text. The result is flattened into a `StackSelection` and merged
//! over any stack configuration the caller already has.

pub mod handlers;
pub mod heuristics;
pub mod models;
pub mod prompts;

use std::time::Instant;

use axum::http::StatusCode;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::llm_client::retry::{complete_with_retry, RetryPolicy};
use crate::llm_client::{parse_json_reply, LanguageModel};
use crate::pipeline::failure::FailureKind;
use crate::pipeline::validation::{check_length, TextLimits, ValidationError};
use crate::pipeline::{elapsed_ms, StageError};
use models::{merge_stack_selection, to_stack_selection, ExtractedTechStack, StackSelectionJson};

const SERVICE: &str = "Tech stack extraction";

pub const TECH_STACK_LIMITS: TextLimits = TextLimits {
    min_chars: 10,
    max_chars: 50_000,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStackMetadata {
    pub original_length: usize,
    pub processing_time_ms: u64,
    pub extracted_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStackExtractionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<StackSelectionJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: TechStackMetadata,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl TechStackExtractionResult {
    pub fn status_code(&self) -> StatusCode {
        self.failure.map_or(StatusCode::OK, FailureKind::status_code)
    }
}

pub async fn extract_tech_stack(
    text: &str,
    existing: Option<StackSelectionJson>,
    llm: &dyn LanguageModel,
    retry: &RetryPolicy,
) -> TechStackExtractionResult {
    let started = Instant::now();

    match extract(text, llm, retry).await {
        Ok((original_length, extracted)) => {
            let extracted_count = extracted.tech_stack.total();
            let selection = to_stack_selection(&extracted);
            let tech_stack = merge_stack_selection(existing, &selection);
            let processing_time_ms = elapsed_ms(started);
            info!(
                extracted_count,
                processing_time_ms,
                seniority = %selection.seniority,
                "Tech stack extraction completed"
            );
            TechStackExtractionResult {
                success: true,
                tech_stack: Some(tech_stack),
                error: None,
                metadata: TechStackMetadata {
                    original_length,
                    processing_time_ms,
                    extracted_count,
                },
                failure: None,
            }
        }
        Err(e) => {
            let processing_time_ms = elapsed_ms(started);
            error!(
                text_length = text.chars().count(),
                processing_time_ms,
                "Tech stack extraction failed: {e}"
            );
            TechStackExtractionResult {
                success: false,
                tech_stack: None,
                error: Some(e.user_message(SERVICE)),
                metadata: TechStackMetadata {
                    original_length: text.chars().count(),
                    processing_time_ms,
                    extracted_count: 0,
                },
                failure: Some(e.kind()),
            }
        }
    }
}

async fn extract(
    text: &str,
    llm: &dyn LanguageModel,
    retry: &RetryPolicy,
) -> Result<(usize, ExtractedTechStack), StageError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty.into());
    }
    check_length(text, TECH_STACK_LIMITS)?;

    let cleaned = text.trim();
    let original_length = cleaned.chars().count();
    info!(original_length, "Starting tech stack extraction");

    let reply = complete_with_retry(
        llm,
        retry,
        SERVICE,
        &prompts::extractor_system(),
        &prompts::extract_prompt(cleaned),
    )
    .await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(StageError::Response(
            "Tech stack extraction resulted in empty text".to_string(),
        ));
    }

    Ok((original_length, parse_reply(reply, cleaned)))
}

/// Parses the model's JSON, falling back to keyword heuristics over the
/// reply followed by the source text.
fn parse_reply(reply: &str, source: &str) -> ExtractedTechStack {
    match parse_json_reply::<ExtractedTechStack>(reply) {
        Ok(extracted) => extracted,
        Err(e) => {
            warn!("Tech stack reply was not usable JSON, using keyword heuristics: {e}");
            heuristics::extract_from_text(&format!("{reply}\n{source}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;
    use crate::llm_client::mock::ScriptedModel;

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            attempts: 2,
            initial_delay: Duration::from_millis(1),
            timeout: Duration::from_secs(5),
        }
    }

    fn stack_reply() -> String {
        json!({
            "role_title": "Frontend Engineer",
            "seniority": "senior",
            "tech_stack": {
                "languages": ["TypeScript"],
                "frameworks": ["React", "Next.js"],
                "databases": [],
                "devops": ["Docker"],
                "cloud": ["AWS"],
                "testing": ["Jest"],
                "tools": ["Figma"],
                "other": []
            },
            "assumptions": []
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_json_reply_is_flattened() {
        let llm = ScriptedModel::replying(&format!("```json\n{}\n```", stack_reply()));
        let result = extract_tech_stack(
            "Senior frontend engineer with React and TypeScript",
            None,
            &llm,
            &fast_retry(),
        )
        .await;

        assert!(result.success);
        let stack = result.tech_stack.unwrap();
        assert_eq!(stack["role_title"], "Frontend Engineer");
        assert_eq!(
            stack["primary_stack"],
            json!(["TypeScript", "React", "Next.js", "Docker", "AWS"])
        );
        assert_eq!(stack["secondary_stack"], json!(["Jest", "Figma"]));
        assert_eq!(result.metadata.extracted_count, 7);
        assert!(llm
            .last_prompt()
            .unwrap()
            .ends_with("Senior frontend engineer with React and TypeScript"));
    }

    #[tokio::test]
    async fn test_prose_reply_falls_back_to_heuristics() {
        let llm = ScriptedModel::replying("The role needs a strong engineer.");
        let result = extract_tech_stack(
            "Senior React/TypeScript role...",
            None,
            &llm,
            &fast_retry(),
        )
        .await;

        assert!(result.success);
        let stack = result.tech_stack.unwrap();
        assert_eq!(stack["seniority"], "senior");
        let technical: Vec<&str> = stack["technical_stack"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(technical.contains(&"React"));
        assert!(technical.contains(&"TypeScript"));
    }

    #[tokio::test]
    async fn test_existing_config_is_merged_under_derived() {
        let llm = ScriptedModel::replying(&stack_reply());
        let Value::Object(existing) = json!({"seniority": "junior", "team": "payments"}) else {
            unreachable!()
        };
        let result = extract_tech_stack(
            "Senior frontend engineer wanted",
            Some(existing),
            &llm,
            &fast_retry(),
        )
        .await;

        let stack = result.tech_stack.unwrap();
        assert_eq!(stack["seniority"], "senior");
        assert_eq!(stack["team"], "payments");
    }

    #[tokio::test]
    async fn test_validation_happens_before_the_call() {
        let llm = ScriptedModel::replying(&stack_reply());

        let blank = extract_tech_stack("    ", None, &llm, &fast_retry()).await;
        assert_eq!(blank.error.as_deref(), Some("Input text cannot be empty"));

        let short = extract_tech_stack("Rust dev", None, &llm, &fast_retry()).await;
        assert_eq!(
            short.error.as_deref(),
            Some("Text must be at least 10 characters long")
        );
        assert_eq!(short.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(short.metadata.original_length, 8);

        let long = extract_tech_stack(&"Rust ".repeat(10_001), None, &llm, &fast_retry()).await;
        assert_eq!(
            long.error.as_deref(),
            Some("Text exceeds maximum length of 50000 characters")
        );
        assert_eq!(long.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_classified() {
        let llm = ScriptedModel::failing(403, "forbidden");
        let result =
            extract_tech_stack("Senior frontend engineer wanted", None, &llm, &fast_retry()).await;
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Tech stack extraction service authentication failed. Please contact support.")
        );
        assert_eq!(result.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(result.metadata.extracted_count, 0);
    }
}
