//! In-memory Office packages for parser tests.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn zip(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, body) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Paragraphs are inserted verbatim, so callers escape XML themselves.
pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );
    zip(&[("word/document.xml", document.as_str())])
}

/// Every cell becomes a shared string.
pub fn xlsx(sheets: &[(&str, &[&[&str]])]) -> Vec<u8> {
    let mut shared: Vec<String> = Vec::new();
    let mut sheet_parts = Vec::new();
    let mut workbook_sheets = String::new();
    let mut rels = String::new();

    for (index, (name, rows)) in sheets.iter().enumerate() {
        let n = index + 1;
        let mut rows_xml = String::new();
        for (r, row) in rows.iter().enumerate() {
            rows_xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, value) in row.iter().enumerate() {
                let column = (b'A' + c as u8) as char;
                rows_xml.push_str(&format!(
                    r#"<c r="{column}{}" t="s"><v>{}</v></c>"#,
                    r + 1,
                    shared.len()
                ));
                shared.push(value.to_string());
            }
            rows_xml.push_str("</row>");
        }
        sheet_parts.push((
            format!("xl/worksheets/sheet{n}.xml"),
            format!("<worksheet><sheetData>{rows_xml}</sheetData></worksheet>"),
        ));
        workbook_sheets.push_str(&format!(
            r#"<sheet name="{name}" sheetId="{n}" r:id="rId{n}"/>"#
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));
    }

    let shared_xml: String = shared
        .iter()
        .map(|s| format!("<si><t>{s}</t></si>"))
        .collect();
    let workbook = format!("<workbook><sheets>{workbook_sheets}</sheets></workbook>");
    let rels = format!("<Relationships>{rels}</Relationships>");
    let shared_xml = format!("<sst>{shared_xml}</sst>");

    let mut parts: Vec<(&str, &str)> = vec![
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/sharedStrings.xml", shared_xml.as_str()),
    ];
    for (path, xml) in &sheet_parts {
        parts.push((path.as_str(), xml.as_str()));
    }
    zip(&parts)
}

pub fn pptx(slides: &[&[&str]]) -> Vec<u8> {
    let xml: Vec<(String, String)> = slides
        .iter()
        .enumerate()
        .map(|(index, paragraphs)| {
            let body: String = paragraphs
                .iter()
                .map(|p| format!("<a:p><a:r><a:t>{p}</a:t></a:r></a:p>"))
                .collect();
            (
                format!("ppt/slides/slide{}.xml", index + 1),
                format!("<p:sld><p:cSld><p:spTree>{body}</p:spTree></p:cSld></p:sld>"),
            )
        })
        .collect();
    // Reverse insertion order so slide ordering cannot rely on archive order.
    let parts: Vec<(&str, &str)> = xml
        .iter()
        .rev()
        .map(|(path, body)| (path.as_str(), body.as_str()))
        .collect();
    zip(&parts)
}

/// Single-page PDF showing `line` in Helvetica. Offsets in the xref table are
/// computed, so the file is well-formed for strict readers.
pub fn pdf(line: &str) -> Vec<u8> {
    let content = format!("BT /F1 18 Tf 72 720 Td ({line}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", index + 1).as_bytes());
    }

    let xref_start = out.len();
    out.extend_from_slice(
        format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
    );
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}
