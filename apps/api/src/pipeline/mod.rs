// Shared plumbing for the LLM-backed stages (translation, tech-stack extraction,
// challenge generation). Each stage validates input, runs one LLM completion
// through `llm_client::retry`, and reports failures as a result object.

pub mod failure;
pub mod validation;

use std::time::Instant;

use thiserror::Error;

use crate::llm_client::LlmError;
use failure::FailureKind;
use validation::ValidationError;

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model answered, but not with anything usable.
    #[error("{0}")]
    Response(String),
}

impl StageError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StageError::Validation(_) => FailureKind::Validation,
            StageError::Llm(e) => FailureKind::classify(e),
            StageError::Response(_) => FailureKind::Unexpected,
        }
    }

    /// Validation messages are shown verbatim; everything else is mapped to
    /// the category message so provider details never reach the client.
    pub fn user_message(&self, service: &str) -> String {
        match self {
            StageError::Validation(e) => e.to_string(),
            other => other.kind().user_message(service),
        }
    }
}

pub fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
