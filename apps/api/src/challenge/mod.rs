//! Coding-challenge generation from a job offer and its stack selection.

pub mod handlers;
pub mod models;
pub mod prompts;

use std::time::Instant;

use axum::http::StatusCode;
use serde::Serialize;
use tracing::{error, info};

use crate::llm_client::retry::{complete_with_retry, RetryPolicy};
use crate::llm_client::{parse_json_reply, LanguageModel};
use crate::pipeline::failure::FailureKind;
use crate::pipeline::validation::{check_length, TextLimits, ValidationError};
use crate::pipeline::{elapsed_ms, StageError};
use crate::tech_stack::models::StackSelectionJson;
use models::Challenge;

const SERVICE: &str = "Challenge generation";

pub const JOB_OFFER_LIMITS: TextLimits = TextLimits {
    min_chars: 10,
    max_chars: 50_000,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeMetadata {
    pub job_offer_length: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeGenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: ChallengeMetadata,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl ChallengeGenerationResult {
    pub fn status_code(&self) -> StatusCode {
        self.failure.map_or(StatusCode::OK, FailureKind::status_code)
    }
}

pub async fn generate_challenge(
    job_offer: &str,
    stack_selection: &StackSelectionJson,
    llm: &dyn LanguageModel,
    retry: &RetryPolicy,
) -> ChallengeGenerationResult {
    let started = Instant::now();
    let job_offer_length = job_offer.trim().chars().count();

    match generate(job_offer, stack_selection, llm, retry).await {
        Ok(challenge) => {
            let processing_time_ms = elapsed_ms(started);
            info!(
                title = %challenge.title,
                difficulty = %challenge.difficulty_level,
                processing_time_ms,
                "Challenge generated"
            );
            ChallengeGenerationResult {
                success: true,
                challenge: Some(challenge),
                error: None,
                metadata: ChallengeMetadata {
                    job_offer_length,
                    processing_time_ms,
                },
                failure: None,
            }
        }
        Err(e) => {
            let processing_time_ms = elapsed_ms(started);
            error!(job_offer_length, processing_time_ms, "Challenge generation failed: {e}");
            ChallengeGenerationResult {
                success: false,
                challenge: None,
                error: Some(e.user_message(SERVICE)),
                metadata: ChallengeMetadata {
                    job_offer_length,
                    processing_time_ms,
                },
                failure: Some(e.kind()),
            }
        }
    }
}

async fn generate(
    job_offer: &str,
    stack_selection: &StackSelectionJson,
    llm: &dyn LanguageModel,
    retry: &RetryPolicy,
) -> Result<Challenge, StageError> {
    if job_offer.trim().is_empty() {
        return Err(ValidationError::Empty.into());
    }
    check_length(job_offer, JOB_OFFER_LIMITS)?;

    let selection = serde_json::to_string_pretty(stack_selection)
        .map_err(|e| StageError::Response(format!("Unserializable stack selection: {e}")))?;
    let prompt = prompts::generate_prompt(job_offer.trim(), &selection);

    let reply = complete_with_retry(llm, retry, SERVICE, &prompts::generator_system(), &prompt).await?;
    let challenge: Challenge = parse_json_reply(&reply)?;
    challenge
        .validate()
        .map_err(|reason| StageError::Response(format!("Generated challenge is invalid: {reason}")))?;

    Ok(challenge)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;
    use crate::llm_client::mock::ScriptedModel;
    use models::tests::sample_challenge_json;

    const OFFER: &str = "Senior Rust engineer building low-latency trading systems with Tokio.";

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            attempts: 2,
            initial_delay: Duration::from_millis(1),
            timeout: Duration::from_secs(5),
        }
    }

    fn selection() -> StackSelectionJson {
        let Value::Object(map) = json!({"primary_stack": ["Rust", "Tokio"], "difficulty": "senior"})
        else {
            unreachable!()
        };
        map
    }

    #[tokio::test]
    async fn test_generates_valid_challenge() {
        let llm = ScriptedModel::replying(&sample_challenge_json().to_string());
        let result = generate_challenge(OFFER, &selection(), &llm, &fast_retry()).await;

        assert!(result.success);
        assert_eq!(result.status_code(), StatusCode::OK);
        assert_eq!(result.challenge.unwrap().title, "Realtime order book");
        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("\"primary_stack\""));
        assert!(prompt.ends_with(OFFER));
    }

    #[tokio::test]
    async fn test_invalid_rubric_is_rejected() {
        let mut reply = sample_challenge_json();
        reply["evaluation_criteria"]["correctness"]["weight"] = json!(-5);
        let llm = ScriptedModel::replying(&reply.to_string());
        let result = generate_challenge(OFFER, &selection(), &llm, &fast_retry()).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Challenge generation failed due to an unexpected error")
        );
        assert_eq!(result.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_difficulty_is_rejected() {
        let mut reply = sample_challenge_json();
        reply["difficulty_level"] = json!("expert wizard");
        let llm = ScriptedModel::replying(&reply.to_string());
        let result = generate_challenge(OFFER, &selection(), &llm, &fast_retry()).await;

        assert!(!result.success);
        assert!(result.challenge.is_none());
        assert_eq!(result.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_non_json_reply_is_an_error() {
        let llm = ScriptedModel::replying("I cannot help with that.");
        let result = generate_challenge(OFFER, &selection(), &llm, &fast_retry()).await;
        assert!(!result.success);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_short_job_offer_is_rejected_before_the_call() {
        let llm = ScriptedModel::replying("unused");
        let result = generate_challenge("Rust", &selection(), &llm, &fast_retry()).await;
        assert_eq!(
            result.error.as_deref(),
            Some("Text must be at least 10 characters long")
        );
        assert_eq!(result.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_oversized_job_offer_is_rejected_before_the_call() {
        let llm = ScriptedModel::replying("unused");
        let offer = "a".repeat(50_001);
        let result = generate_challenge(&offer, &selection(), &llm, &fast_retry()).await;
        assert_eq!(
            result.error.as_deref(),
            Some("Text exceeds maximum length of 50000 characters")
        );
        assert_eq!(result.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }
}
