use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Character bounds a stage accepts before any network call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooShort { min: usize },
    TooLong { max: usize },
    NoMeaningfulContent,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "Input text cannot be empty"),
            ValidationError::TooShort { min } => {
                let noun = if *min == 1 { "character" } else { "characters" };
                write!(f, "Text must be at least {min} {noun} long")
            }
            ValidationError::TooLong { max } => {
                write!(f, "Text exceeds maximum length of {max} characters")
            }
            ValidationError::NoMeaningfulContent => write!(
                f,
                "Text appears to contain only whitespace, numbers, or symbols"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks emptiness and the character bounds. Blank text that is not empty
/// passes here; callers decide whether to reject it.
pub fn check_length(text: &str, limits: TextLimits) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    let chars = text.chars().count();
    if chars < limits.min_chars {
        return Err(ValidationError::TooShort {
            min: limits.min_chars,
        });
    }
    if chars > limits.max_chars {
        return Err(ValidationError::TooLong {
            max: limits.max_chars,
        });
    }
    Ok(())
}

/// Rejects text made only of whitespace, digits and punctuation.
pub fn check_meaningful(text: &str) -> Result<(), ValidationError> {
    if meaningless_patterns().iter().any(|p| p.is_match(text)) {
        return Err(ValidationError::NoMeaningfulContent);
    }
    Ok(())
}

fn meaningless_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"^\s+$",
            r"^[0-9\s.,;:!?\-_=+*&^%$#@()\[\]{}|\\/<>]+$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static pattern is valid"))
        .collect()
    })
}
