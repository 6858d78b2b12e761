use serde::Serialize;

pub const PDF: &str = "application/pdf";
pub const DOC: &str = "application/msword";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT: &str = "text/plain";
pub const MARKDOWN: &str = "text/markdown";
pub const JSON: &str = "application/json";
pub const XLS: &str = "application/vnd.ms-excel";
pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PPT: &str = "application/vnd.ms-powerpoint";
pub const PPTX: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const JPEG: &str = "image/jpeg";
pub const PNG: &str = "image/png";
pub const GIF: &str = "image/gif";
pub const WEBP: &str = "image/webp";

/// MIME types accepted by default for job-offer uploads.
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &[
    PDF, DOC, DOCX, TEXT, MARKDOWN, JSON, XLS, XLSX, PPT, PPTX, JPEG, PNG, GIF, WEBP,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Document,
    Spreadsheet,
    Presentation,
    Text,
    Image,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTypeInfo {
    #[serde(rename = "type")]
    pub mime_type: String,
    pub category: FileCategory,
    /// Whether text can actually be extracted (images need OCR, legacy PPT is opaque).
    pub supported: bool,
}

pub fn file_type_info(mime_type: &str) -> FileTypeInfo {
    // OOXML spreadsheet and presentation types contain "officedocument",
    // so they are matched before the generic document check.
    let (category, supported) = if mime_type.contains("excel") || mime_type.contains("spreadsheet")
    {
        (FileCategory::Spreadsheet, true)
    } else if mime_type.contains("powerpoint") || mime_type.contains("presentation") {
        (FileCategory::Presentation, mime_type.contains("openxml"))
    } else if mime_type.contains("pdf")
        || mime_type.contains("word")
        || mime_type.contains("document")
    {
        (FileCategory::Document, true)
    } else if mime_type.contains("text")
        || mime_type.contains("json")
        || mime_type.contains("markdown")
    {
        (FileCategory::Text, true)
    } else if mime_type.contains("image") {
        (FileCategory::Image, false)
    } else {
        (FileCategory::Other, false)
    };

    FileTypeInfo {
        mime_type: mime_type.to_string(),
        category,
        supported,
    }
}

/// Human-readable size: "0 Bytes", "512 Bytes", "1.5 KB", "50 MB".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}
