//! Heuristic markdown formatting for translated job offers.
//!
//! Pure and deterministic: each line is classified on its own text and the
//! line that follows it, then rendered. No model calls.

pub mod handlers;

use std::sync::OnceLock;

use regex::Regex;

/// Converts plain job-offer text into markdown.
///
/// Blank lines are dropped and every other line is trimmed. The first line
/// becomes the H1 title; the rest are classified in this order: section
/// header, subsection header, key-value pair, bullet, numbered item,
/// question, requirement, paragraph.
pub fn format_text_to_markdown(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((title, rest)) = lines.split_first() else {
        return String::new();
    };

    let mut out: Vec<String> = vec![format!("# {}", title_text(title)), String::new()];

    for (i, line) in rest.iter().copied().enumerate() {
        let next = rest.get(i + 1).copied().unwrap_or("");

        if is_section_header(line) {
            if out.last().is_some_and(|last| !last.is_empty()) {
                out.push(String::new());
            }
            out.push(format!("## {line}"));
            out.push(String::new());
        } else if is_subsection_header(line, next) {
            out.push(format!("### {line}"));
            out.push(String::new());
        } else if is_key_value_pair(line) {
            out.push(format!("**{line}**"));
            out.push(String::new());
        } else if is_bullet(line) {
            out.push(format!("* {}", strip_bullet(line)));
        } else if is_numbered_item(line) {
            out.push(line.to_string());
        } else if is_question(line) {
            out.push(format!("**{line}**"));
            out.push(String::new());
        } else if is_requirement(line) {
            out.push(format!("* {line}"));
        } else {
            out.push(line.to_string());
            if !next.is_empty()
                && !is_bullet(next)
                && !is_numbered_item(next)
                && !is_key_value_pair(next)
            {
                out.push(String::new());
            }
        }
    }

    let joined = out.join("\n");
    blank_runs().replace_all(&joined, "\n\n").trim().to_string()
}

/// Existing heading markers on the title are dropped so it is not rendered as `# ## Title`.
fn title_text(line: &str) -> &str {
    let stripped = line.trim_start_matches('#').trim_start();
    if stripped.is_empty() {
        line
    } else {
        stripped
    }
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

fn is_section_header(line: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"(?i)^(?:job title|job description|company description|qualifications|requirements|responsibilities|tasks|skills|experience|benefits|location|salary|recruitment process|who we are|must have(?: skills?)?|nice to have(?: skills?)?|the position|your role|what about you\??|about (?:you|the role)|role overview|key responsibilities|what we offer|what you'll do|what we're looking for|preferred qualifications|technical requirements)$",
            )
            .expect("static pattern is valid")
        })
        .is_match(line)
}

/// A short line introducing a longer one, ending in `:` or written in capitals.
fn is_subsection_header(line: &str, next: &str) -> bool {
    let len = char_len(line);
    if len < 50 && !next.is_empty() && char_len(next) > len {
        return line.ends_with(':') || line == line.to_uppercase();
    }
    false
}

/// `key: value` with a non-empty key and value, under 100 characters.
fn is_key_value_pair(line: &str) -> bool {
    match line.find(':') {
        Some(colon) => colon > 0 && colon + 1 < line.len() && char_len(line) < 100,
        None => false,
    }
}

fn is_bullet(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some('-' | '*' | '•'))
        && chars.next().is_some_and(char::is_whitespace)
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', '*', '•'])
        .trim_start()
}

fn is_numbered_item(line: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^(?:[0-9]+[.)]\s+|[1-9]\x{FE0F}\x{20E3})")
                .expect("static pattern is valid")
        })
        .is_match(line)
}

fn is_question(line: &str) -> bool {
    line.ends_with('?') && char_len(line) < 200
}

fn is_requirement(line: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"(?i)^(?:experience|knowledge|proficiency|fluent|[0-9]+\+?\s+years?|bachelor|master|degree|strong|excellent|solid|proven|familiarity|understanding).+",
            )
            .expect("static pattern is valid")
        })
        .is_match(line)
        && char_len(line) < 300
}

fn blank_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n{3,}").expect("static pattern is valid"))
}
