//! Axum route handler for the Translation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::routes::body::{json_body, required_text};
use crate::state::AppState;
use crate::translation::{translate_extracted_text, TranslationResult};

/// POST /api/translate-text
///
/// Body: `{ "text": "..." }`. Failed translations keep the result body and
/// take their status from the failure category.
pub async fn handle_translate_text(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<TranslationResult>), AppError> {
    let body = json_body(body)?;
    let text = required_text(&body, &["text"], "Text is required and must be a string")?;

    let result = translate_extracted_text(text, state.llm.as_ref(), &state.retry).await;
    Ok((result.status_code(), Json(result)))
}
