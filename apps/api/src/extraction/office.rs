//! Text from Office Open XML containers (DOCX, XLSX, PPTX).
//!
//! The packages are zip archives of XML parts; only the text-bearing
//! elements are scanned, styles and layout are ignored.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use zip::result::ZipError;
use zip::ZipArchive;

use super::parsers::ParseError;

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Highest column index an XLSX sheet can address (XFD).
const MAX_COLUMNS: usize = 16_384;

pub struct SheetText {
    pub name: String,
    pub text: String,
}

/// Paragraph text of `word/document.xml`, paragraphs separated by a blank line.
pub fn docx_text(data: &[u8]) -> Result<String, ParseError> {
    let mut archive = open(data)?;
    let xml = require_part(&mut archive, "word/document.xml")?;

    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = cached(
        &TOKEN,
        r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>|<w:br\b[^>]*/>|<w:cr/>",
    );

    let paragraphs: Vec<String> = xml
        .split("</w:p>")
        .map(|chunk| {
            let mut text = String::new();
            for caps in token.captures_iter(chunk) {
                match caps.get(1) {
                    Some(run) => text.push_str(&unescape_xml(run.as_str())),
                    None if caps[0].starts_with("<w:tab") => text.push('\t'),
                    None => text.push('\n'),
                }
            }
            text
        })
        .filter(|p| !p.trim().is_empty())
        .collect();

    Ok(paragraphs.join("\n\n"))
}

/// Every worksheet in workbook order, rows as tab-separated lines.
pub fn xlsx_sheets(data: &[u8]) -> Result<Vec<SheetText>, ParseError> {
    let mut archive = open(data)?;
    let workbook = require_part(&mut archive, "xl/workbook.xml")?;
    let rels = read_part(&mut archive, "xl/_rels/workbook.xml.rels")?.unwrap_or_default();
    let shared = read_part(&mut archive, "xl/sharedStrings.xml")?
        .map(|xml| shared_strings(&xml))
        .unwrap_or_default();

    static SHEET: OnceLock<Regex> = OnceLock::new();
    static RELATIONSHIP: OnceLock<Regex> = OnceLock::new();
    let sheet_re = cached(&SHEET, r"<sheet\s([^>]*?)/?>");
    let rel_re = cached(&RELATIONSHIP, r"<Relationship\s([^>]*?)/?>");

    let targets: HashMap<String, String> = rel_re
        .captures_iter(&rels)
        .filter_map(|caps| {
            let attrs = attributes(&caps[1]);
            Some((attrs.get("Id")?.clone(), attrs.get("Target")?.clone()))
        })
        .collect();

    let mut sheets = Vec::new();
    for (index, caps) in sheet_re.captures_iter(&workbook).enumerate() {
        let attrs = attributes(&caps[1]);
        let name = attrs
            .get("name")
            .map(|n| unescape_xml(n).into_owned())
            .unwrap_or_else(|| format!("Sheet{}", index + 1));
        let path = attrs
            .get("r:id")
            .and_then(|id| targets.get(id))
            .map(|target| match target.strip_prefix('/') {
                Some(absolute) => absolute.to_string(),
                None => format!("xl/{target}"),
            })
            .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", index + 1));

        let text = match read_part(&mut archive, &path)? {
            Some(xml) => sheet_rows(&xml, &shared).join("\n"),
            None => String::new(),
        };
        sheets.push(SheetText { name, text });
    }

    Ok(sheets)
}

/// Text of each slide, in slide-number order.
pub fn pptx_slides(data: &[u8]) -> Result<Vec<String>, ParseError> {
    let mut archive = open(data)?;

    static SLIDE_NAME: OnceLock<Regex> = OnceLock::new();
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let slide_name = cached(&SLIDE_NAME, r"^ppt/slides/slide(\d+)\.xml$");
    let token = cached(&TOKEN, r"<a:t(?:\s[^>]*)?>([^<]*)</a:t>|<a:br\b[^>]*/>");

    let mut numbered: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = slide_name.captures(name)?[1].parse().ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort_by_key(|(number, _)| *number);

    if numbered.is_empty() {
        return Err(ParseError::MissingPart("ppt/slides/slide1.xml".to_string()));
    }

    let mut slides = Vec::with_capacity(numbered.len());
    for (_, path) in numbered {
        let xml = require_part(&mut archive, &path)?;
        let paragraphs: Vec<String> = xml
            .split("</a:p>")
            .map(|chunk| {
                let mut text = String::new();
                for caps in token.captures_iter(chunk) {
                    match caps.get(1) {
                        Some(run) => text.push_str(&unescape_xml(run.as_str())),
                        None => text.push('\n'),
                    }
                }
                text
            })
            .filter(|p| !p.trim().is_empty())
            .collect();
        slides.push(paragraphs.join("\n"));
    }

    Ok(slides)
}

fn shared_strings(xml: &str) -> Vec<String> {
    static ITEM: OnceLock<Regex> = OnceLock::new();
    let item = cached(&ITEM, r"(?s)<si>(.*?)</si>");
    item.captures_iter(xml)
        .map(|caps| inline_text(&caps[1]))
        .collect()
}

fn sheet_rows(xml: &str, shared: &[String]) -> Vec<String> {
    static ROW: OnceLock<Regex> = OnceLock::new();
    static CELL: OnceLock<Regex> = OnceLock::new();
    static VALUE: OnceLock<Regex> = OnceLock::new();
    let row_re = cached(&ROW, r"(?s)<row(?:\s[^>]*[^/])?>(.*?)</row>");
    let cell_re = cached(&CELL, r"(?s)<c\b([^>]*?)(?:/>|>(.*?)</c>)");
    let value_re = cached(&VALUE, r"<v>([^<]*)</v>");

    let mut rows = Vec::new();
    for row in row_re.captures_iter(xml) {
        let mut cells: Vec<String> = Vec::new();
        for cell in cell_re.captures_iter(&row[1]) {
            let attrs = attributes(&cell[1]);
            let body = cell.get(2).map(|m| m.as_str()).unwrap_or("");
            let raw = value_re
                .captures(body)
                .map(|v| unescape_xml(&v[1]).into_owned());

            let value = match attrs.get("t").map(String::as_str) {
                Some("s") => raw
                    .and_then(|idx| idx.trim().parse::<usize>().ok())
                    .and_then(|idx| shared.get(idx).cloned())
                    .unwrap_or_default(),
                Some("inlineStr") => inline_text(body),
                Some("b") => match raw.as_deref() {
                    Some("1") => "TRUE".to_string(),
                    Some(_) => "FALSE".to_string(),
                    None => String::new(),
                },
                _ => raw.unwrap_or_default(),
            };

            let column = attrs
                .get("r")
                .and_then(|r| column_index(r))
                .unwrap_or(cells.len())
                .min(MAX_COLUMNS - 1);
            if column >= cells.len() {
                cells.resize(column + 1, String::new());
            }
            cells[column] = value;
        }
        rows.push(cells.join("\t"));
    }
    rows
}

/// Concatenated `<t>` runs (rich text and inline strings).
fn inline_text(xml: &str) -> String {
    static RUN: OnceLock<Regex> = OnceLock::new();
    let run = cached(&RUN, r"<t(?:\s[^>]*)?>([^<]*)</t>");
    run.captures_iter(xml)
        .map(|caps| unescape_xml(caps.get(1).map_or("", |m| m.as_str())).into_owned())
        .collect()
}

/// Zero-based column of an A1-style reference ("C7" -> 2).
fn column_index(reference: &str) -> Option<usize> {
    let letters: Vec<char> = reference
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let number = letters.iter().fold(0usize, |acc, c| {
        acc.saturating_mul(26)
            .saturating_add((c.to_ascii_uppercase() as usize) - ('A' as usize) + 1)
    });
    Some(number - 1)
}

fn attributes(raw: &str) -> HashMap<String, String> {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    let attr = cached(&ATTR, r#"([\w:]+)\s*=\s*"([^"]*)""#);
    attr.captures_iter(raw)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Resolves the predefined XML entities and numeric character references.
pub fn unescape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    let entity = cached(&ENTITY, r"&(#x[0-9a-fA-F]+|#[0-9]+|lt|gt|amp|quot|apos);");
    entity.replace_all(text, |caps: &Captures| match &caps[1] {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        numeric => {
            let code = match numeric.strip_prefix("#x") {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => numeric[1..].parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        }
    })
}

fn open(data: &[u8]) -> Result<Archive<'_>, ParseError> {
    Ok(ZipArchive::new(Cursor::new(data))?)
}

fn read_part(archive: &mut Archive<'_>, name: &str) -> Result<Option<String>, ParseError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

fn require_part(archive: &mut Archive<'_>, name: &str) -> Result<String, ParseError> {
    read_part(archive, name)?.ok_or_else(|| ParseError::MissingPart(name.to_string()))
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern is valid"))
}
