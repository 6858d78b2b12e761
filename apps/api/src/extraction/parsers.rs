//! Format-specific parsers, dispatched on MIME type.

use bytes::Bytes;
use thiserror::Error;

use super::file_types as mime;
use super::office;

pub const DOC_UNSUPPORTED: &str =
    "Unable to extract text from .doc file. Please convert to .docx format for better support.";
pub const XLS_UNSUPPORTED: &str =
    "Unable to extract text from .xls file. Please convert to .xlsx format for better support.";
pub const PPT_UNSUPPORTED: &str = "PowerPoint file detected. Text extraction from legacy \
    PowerPoint files requires additional processing. Please convert to PDF or extract text manually.";
pub const IMAGE_UNSUPPORTED: &str = "Image file detected. Text extraction from images requires \
    OCR (Optical Character Recognition) capabilities. Please use a tool that supports OCR or \
    convert the image to PDF with text layer.";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Invalid document package: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is missing required part '{0}'")]
    MissingPart(String),

    #[error("Document parser crashed")]
    Crashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub text: String,
    pub pages_count: Option<usize>,
    pub sheets_count: Option<usize>,
    pub method: &'static str,
}

impl ParsedDocument {
    fn text(text: String, method: &'static str) -> Self {
        Self {
            text,
            pages_count: None,
            sheets_count: None,
            method,
        }
    }
}

/// Parses `data` according to `content_type` on the blocking pool.
/// A panicking parser is reported as `ParseError::Crashed`.
pub async fn parse_document(content_type: &str, data: Bytes) -> Result<ParsedDocument, ParseError> {
    let content_type = content_type.to_string();
    tokio::task::spawn_blocking(move || parse_sync(&content_type, &data))
        .await
        .map_err(|_| ParseError::Crashed)?
}

fn parse_sync(content_type: &str, data: &[u8]) -> Result<ParsedDocument, ParseError> {
    match content_type {
        mime::PDF => pdf(data),
        mime::DOCX => Ok(ParsedDocument::text(office::docx_text(data)?, "docx-xml")),
        mime::DOC => Ok(match office::docx_text(data) {
            Ok(text) => ParsedDocument::text(text, "docx-xml (limited support for .doc)"),
            Err(_) => ParsedDocument::text(DOC_UNSUPPORTED.to_string(), "unsupported"),
        }),
        mime::TEXT | mime::MARKDOWN => Ok(ParsedDocument::text(lossy(data), "utf-8")),
        mime::JSON => Ok(json(data)),
        mime::XLSX => spreadsheet(data),
        mime::XLS => Ok(spreadsheet(data).unwrap_or_else(|_| {
            ParsedDocument::text(XLS_UNSUPPORTED.to_string(), "unsupported")
        })),
        mime::PPTX => presentation(data),
        mime::PPT => Ok(ParsedDocument::text(
            PPT_UNSUPPORTED.to_string(),
            "unsupported",
        )),
        image if image.starts_with("image/") => Ok(ParsedDocument::text(
            IMAGE_UNSUPPORTED.to_string(),
            "unsupported (requires OCR)",
        )),
        _ => Ok(ParsedDocument::text(lossy(data), "utf-8 (unknown type)")),
    }
}

fn pdf(data: &[u8]) -> Result<ParsedDocument, ParseError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| ParseError::Pdf(e.to_string()))?;
    let text = pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    Ok(ParsedDocument {
        text,
        pages_count: Some(pages.len()),
        sheets_count: None,
        method: "pdf-extract",
    })
}

fn json(data: &[u8]) -> ParsedDocument {
    match serde_json::from_slice::<serde_json::Value>(data) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty) => ParsedDocument::text(pretty, "json-parse"),
            Err(_) => ParsedDocument::text(lossy(data), "utf-8 (invalid json)"),
        },
        Err(_) => ParsedDocument::text(lossy(data), "utf-8 (invalid json)"),
    }
}

fn spreadsheet(data: &[u8]) -> Result<ParsedDocument, ParseError> {
    let sheets = office::xlsx_sheets(data)?;
    let text: String = sheets
        .iter()
        .map(|sheet| format!("\n--- Sheet: {} ---\n{}\n", sheet.name, sheet.text))
        .collect();
    Ok(ParsedDocument {
        text: text.trim().to_string(),
        pages_count: None,
        sheets_count: Some(sheets.len()),
        method: "xlsx",
    })
}

fn presentation(data: &[u8]) -> Result<ParsedDocument, ParseError> {
    let slides = office::pptx_slides(data)?;
    let text = slides
        .iter()
        .enumerate()
        .map(|(index, slide)| format!("--- Slide {} ---\n{}", index + 1, slide))
        .collect::<Vec<_>>()
        .join("\n\n");
    Ok(ParsedDocument {
        text,
        pages_count: Some(slides.len()),
        sheets_count: None,
        method: "pptx-xml",
    })
}

fn lossy(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fixtures;

    fn parse(content_type: &str, data: &[u8]) -> Result<ParsedDocument, ParseError> {
        parse_sync(content_type, data)
    }

    #[test]
    fn test_plain_text_is_lossy_utf8() {
        let doc = parse(mime::TEXT, b"Rust \xF0\x9F\xA6\x80 engineer").unwrap();
        assert_eq!(doc.text, "Rust 🦀 engineer");
        assert_eq!(doc.method, "utf-8");
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let doc = parse(mime::JSON, br#"{"role":"dev"}"#).unwrap();
        assert_eq!(doc.text, "{\n  \"role\": \"dev\"\n}");
        assert_eq!(doc.method, "json-parse");
    }

    #[test]
    fn test_invalid_json_falls_back_to_text() {
        let doc = parse(mime::JSON, b"{not json").unwrap();
        assert_eq!(doc.text, "{not json");
        assert_eq!(doc.method, "utf-8 (invalid json)");
    }

    #[test]
    fn test_spreadsheet_sections() {
        let first: &[&[&str]] = &[&["a", "b"]];
        let second: &[&[&str]] = &[&["c"]];
        let data = fixtures::xlsx(&[("One", first), ("Two", second)]);
        let doc = parse(mime::XLSX, &data).unwrap();
        assert_eq!(
            doc.text,
            "--- Sheet: One ---\na\tb\n\n--- Sheet: Two ---\nc"
        );
        assert_eq!(doc.sheets_count, Some(2));
        assert_eq!(doc.method, "xlsx");
    }

    #[test]
    fn test_legacy_doc_that_is_not_docx_gets_sentinel() {
        let doc = parse(mime::DOC, b"\xD0\xCF\x11\xE0 legacy binary").unwrap();
        assert_eq!(doc.text, DOC_UNSUPPORTED);
        assert_eq!(doc.method, "unsupported");
    }

    #[test]
    fn test_legacy_doc_that_is_really_docx_is_parsed() {
        let data = fixtures::docx(&["Backend Developer"]);
        let doc = parse(mime::DOC, &data).unwrap();
        assert_eq!(doc.text, "Backend Developer");
    }

    #[test]
    fn test_legacy_xls_gets_sentinel() {
        let doc = parse(mime::XLS, b"\xD0\xCF\x11\xE0").unwrap();
        assert_eq!(doc.text, XLS_UNSUPPORTED);
    }

    #[test]
    fn test_pptx_slides_and_page_count() {
        let slides: &[&[&str]] = &[&["Hello"], &["World"]];
        let data = fixtures::pptx(slides);
        let doc = parse(mime::PPTX, &data).unwrap();
        assert_eq!(doc.text, "--- Slide 1 ---\nHello\n\n--- Slide 2 ---\nWorld");
        assert_eq!(doc.pages_count, Some(2));
    }

    #[test]
    fn test_legacy_ppt_and_images_are_explained() {
        assert_eq!(parse(mime::PPT, b"").unwrap().text, PPT_UNSUPPORTED);
        let image = parse(mime::PNG, b"\x89PNG").unwrap();
        assert_eq!(image.text, IMAGE_UNSUPPORTED);
        assert_eq!(image.method, "unsupported (requires OCR)");
    }

    #[test]
    fn test_unknown_type_is_read_as_text() {
        let doc = parse("application/x-yaml", b"role: dev").unwrap();
        assert_eq!(doc.text, "role: dev");
        assert_eq!(doc.method, "utf-8 (unknown type)");
    }

    #[test]
    fn test_broken_docx_is_an_error() {
        assert!(parse(mime::DOCX, b"garbage").is_err());
    }

    #[tokio::test]
    async fn test_single_page_pdf() {
        let data = fixtures::pdf("Senior Rust Engineer");
        let doc = parse_document(mime::PDF, Bytes::from(data)).await.unwrap();
        assert_eq!(
            doc.text.split_whitespace().collect::<Vec<_>>(),
            ["Senior", "Rust", "Engineer"]
        );
        assert_eq!(doc.pages_count, Some(1));
        assert_eq!(doc.sheets_count, None);
        assert_eq!(doc.method, "pdf-extract");
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_an_error_not_a_panic() {
        let result = parse_document(mime::PDF, Bytes::from_static(b"%PDF-1.4 truncated")).await;
        assert!(result.is_err());
    }
}
