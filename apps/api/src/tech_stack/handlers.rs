//! Axum route handler for the Tech-Stack Extraction API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::routes::body::{json_body, required_text};
use crate::state::AppState;
use crate::tech_stack::models::StackSelectionJson;
use crate::tech_stack::{extract_tech_stack, TechStackExtractionResult};

/// POST /api/extract-tech-stack
///
/// Body: `{ "formattedText": "...", "existingJsonConfig": {...} | "{...}" }`.
/// `translatedText` is accepted in place of `formattedText`.
pub async fn handle_extract_tech_stack(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<TechStackExtractionResult>), AppError> {
    let body = json_body(body)?;
    let text = required_text(
        &body,
        &["formattedText", "translatedText"],
        "formatted text is required and must be a string",
    )?;
    let existing = existing_config(body.get("existingJsonConfig"));

    let result = extract_tech_stack(text, existing, state.llm.as_ref(), &state.retry).await;
    Ok((result.status_code(), Json(result)))
}

/// Accepts the config as an object or as a JSON-encoded string. Anything
/// unusable is dropped with a warning rather than failing the request.
fn existing_config(raw: Option<&Value>) -> Option<StackSelectionJson> {
    match raw? {
        Value::Null => None,
        Value::Object(map) => Some(map.clone()),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match serde_json::from_str::<StackSelectionJson>(s) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!("Ignoring unparsable existingJsonConfig: {e}");
                None
            }
        },
        other => {
            warn!("Ignoring existingJsonConfig of unexpected shape: {other}");
            None
        }
    }
}
