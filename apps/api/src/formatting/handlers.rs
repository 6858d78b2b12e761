use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::formatting::format_text_to_markdown;
use crate::routes::body::{json_body, required_text};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatTextResponse {
    pub success: bool,
    pub formatted_text: String,
}

/// POST /api/format-text
pub async fn handle_format_text(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FormatTextResponse>, AppError> {
    let body = json_body(body)?;
    let text = required_text(&body, &["text"], "Text is required and must be a string")?;

    Ok(Json(FormatTextResponse {
        success: true,
        formatted_text: format_text_to_markdown(text),
    }))
}
