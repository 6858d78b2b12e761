//! Text extraction from uploaded job-offer documents.
//!
//! Never fails to the caller: every outcome, including rejected uploads and
//! broken documents, is reported as a `TextExtractionResult`.

pub mod file_types;
pub mod handlers;
mod office;
pub mod parsers;

#[cfg(test)]
mod fixtures;

use axum::http::StatusCode;
use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info, warn};

use file_types::{file_type_info, format_file_size, DEFAULT_ALLOWED_TYPES};
use parsers::parse_document;

const MIB: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct FileProcessingOptions {
    pub include_metadata: bool,
    pub max_file_size: usize,
    /// An empty list accepts every type.
    pub allowed_types: Vec<String>,
}

impl Default for FileProcessingOptions {
    fn default() -> Self {
        Self {
            include_metadata: true,
            max_file_size: 50 * MIB,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets_count: Option<usize>,
    /// Counts are only computed when `include_metadata` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_count: Option<usize>,
    pub extraction_method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailure {
    MissingFile,
    TooLarge,
    UnsupportedType,
    /// The file was accepted but its parser failed.
    Parse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtractionResult {
    pub success: bool,
    pub file_name: String,
    pub file_type: String,
    pub file_size: usize,
    pub extracted_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExtractionMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub failure: Option<ExtractionFailure>,
}

impl TextExtractionResult {
    fn failed(file: Option<&UploadedFile>, failure: ExtractionFailure, error: String) -> Self {
        Self {
            success: false,
            file_name: file.map(|f| f.name.clone()).unwrap_or_default(),
            file_type: file.map(|f| f.content_type.clone()).unwrap_or_default(),
            file_size: file.map(|f| f.data.len()).unwrap_or_default(),
            extracted_text: String::new(),
            metadata: None,
            error: Some(error),
            failure: Some(failure),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.failure {
            None => StatusCode::OK,
            Some(ExtractionFailure::Parse) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(_) => StatusCode::BAD_REQUEST,
        }
    }
}

pub async fn extract_text_from_file(
    file: Option<UploadedFile>,
    options: &FileProcessingOptions,
) -> TextExtractionResult {
    let Some(file) = file else {
        return TextExtractionResult::failed(
            None,
            ExtractionFailure::MissingFile,
            "No file provided".to_string(),
        );
    };

    let info = file_type_info(&file.content_type);
    info!(
        file = %file.name,
        content_type = %file.content_type,
        category = ?info.category,
        size = %format_file_size(file.data.len() as u64),
        "Extracting text from upload"
    );

    if file.data.len() > options.max_file_size {
        let max_mb = (options.max_file_size as f64 / MIB as f64).round();
        warn!(file = %file.name, "Upload rejected: too large");
        return TextExtractionResult::failed(
            Some(&file),
            ExtractionFailure::TooLarge,
            format!("File size exceeds maximum allowed size of {max_mb}MB"),
        );
    }

    if !options.allowed_types.is_empty()
        && !options.allowed_types.iter().any(|t| *t == file.content_type)
    {
        warn!(file = %file.name, content_type = %file.content_type, "Upload rejected: type not allowed");
        return TextExtractionResult::failed(
            Some(&file),
            ExtractionFailure::UnsupportedType,
            format!("File type {} is not supported", file.content_type),
        );
    }

    let parsed = match parse_document(&file.content_type, file.data.clone()).await {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(file = %file.name, "Text extraction failed: {e}");
            return TextExtractionResult::failed(
                Some(&file),
                ExtractionFailure::Parse,
                e.to_string(),
            );
        }
    };

    let metadata = ExtractionMetadata {
        pages_count: parsed.pages_count,
        sheets_count: parsed.sheets_count,
        word_count: options
            .include_metadata
            .then(|| parsed.text.split_whitespace().count()),
        char_count: options.include_metadata.then(|| parsed.text.chars().count()),
        extraction_method: parsed.method.to_string(),
    };

    info!(
        file = %file.name,
        method = parsed.method,
        chars = parsed.text.chars().count(),
        supported = info.supported,
        "Text extraction finished"
    );

    TextExtractionResult {
        success: true,
        file_name: file.name,
        file_type: file.content_type,
        file_size: file.data.len(),
        extracted_text: parsed.text,
        metadata: Some(metadata),
        error: None,
        failure: None,
    }
}

/// Extracts every file in turn; one result per file, in input order.
pub async fn extract_text_from_files(
    files: Vec<UploadedFile>,
    options: &FileProcessingOptions,
) -> Vec<TextExtractionResult> {
    let mut results = Vec::with_capacity(files.len());
    for file in files {
        results.push(extract_text_from_file(Some(file), options).await);
    }
    results
}
