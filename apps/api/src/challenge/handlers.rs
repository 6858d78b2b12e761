//! Axum route handler for the Challenge Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::challenge::{generate_challenge, ChallengeGenerationResult};
use crate::errors::AppError;
use crate::routes::body::{json_body, required_text};
use crate::state::AppState;
use crate::tech_stack::models::StackSelectionJson;

/// POST /api/generate-challenge
///
/// Body: `{ "jobOffer": "...", "stackSelection": {...} }`. A missing stack
/// selection is treated as empty.
pub async fn handle_generate_challenge(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ChallengeGenerationResult>), AppError> {
    let body = json_body(body)?;
    let job_offer = required_text(
        &body,
        &["jobOffer"],
        "Job offer is required and must be a string",
    )?;
    let stack_selection = match body.get("stackSelection") {
        None | Some(Value::Null) => StackSelectionJson::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(AppError::Validation(
                "stackSelection must be a JSON object".to_string(),
            ))
        }
    };

    let result =
        generate_challenge(job_offer, &stack_selection, state.llm.as_ref(), &state.retry).await;
    Ok((result.status_code(), Json(result)))
}
