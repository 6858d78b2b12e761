//! Helpers for the loosely-typed JSON bodies the pipeline endpoints accept.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;

/// Unwraps a JSON body, turning any rejection into a 400.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!("Rejected request body: {rejection}");
            Err(AppError::Validation(
                "Invalid JSON in request body".to_string(),
            ))
        }
    }
}

/// First non-empty string among `keys`. Present-but-empty counts as missing.
pub fn required_text<'a>(body: &'a Value, keys: &[&str], message: &str) -> Result<&'a str, AppError> {
    keys.iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .ok_or_else(|| AppError::Validation(message.to_string()))
}
