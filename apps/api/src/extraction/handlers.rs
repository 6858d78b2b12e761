//! Axum route handlers for the Text Extraction API.

use axum::{
    extract::{multipart::Field, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::{
    extract_text_from_file, extract_text_from_files, FileProcessingOptions, TextExtractionResult,
    UploadedFile,
};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct BatchExtractionResponse {
    pub results: Vec<TextExtractionResult>,
    pub succeeded: usize,
    pub failed: usize,
}

/// POST /api/extract-text
///
/// Reads the multipart `file` field. The status code follows the result:
/// 400 for rejected uploads, 422 when the document could not be parsed.
pub async fn handle_extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<TextExtractionResult>), AppError> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            file = Some(read_upload(field).await?);
            break;
        }
    }

    let result = extract_text_from_file(file, &processing_options(&state)).await;
    Ok((result.status_code(), Json(result)))
}

/// POST /api/extract-text/batch
///
/// Every file field in the form is extracted, in order.
pub async fn handle_extract_text_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchExtractionResponse>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            files.push(read_upload(field).await?);
        }
    }
    if files.is_empty() {
        return Err(AppError::Validation("No files provided".to_string()));
    }

    let results = extract_text_from_files(files, &processing_options(&state)).await;
    let succeeded = results.iter().filter(|r| r.success).count();
    let failed = results.len() - succeeded;

    Ok(Json(BatchExtractionResponse {
        results,
        succeeded,
        failed,
    }))
}

fn processing_options(state: &AppState) -> FileProcessingOptions {
    FileProcessingOptions {
        max_file_size: state.config.max_upload_bytes(),
        ..Default::default()
    }
}

async fn read_upload(field: Field<'_>) -> Result<UploadedFile, AppError> {
    let name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = field.bytes().await?;
    Ok(UploadedFile {
        name,
        content_type,
        data,
    })
}
