use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Loosely-typed stack configuration passed between pipeline steps.
/// Well-known keys are those of `StackSelection`; anything else is carried through.
pub type StackSelectionJson = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    #[default]
    Mid,
    Senior,
}

impl Seniority {
    /// Maps free-form levels ("Senior", "Lead", "entry-level") onto the three buckets.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if ["senior", "lead", "principal", "staff"]
            .iter()
            .any(|k| label.contains(k))
        {
            Seniority::Senior
        } else if ["junior", "entry", "graduate", "intern"]
            .iter()
            .any(|k| label.contains(k))
        {
            Seniority::Junior
        } else {
            Seniority::Mid
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Seniority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Seniority::from_label(&label))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechStackCategories {
    #[serde(default, deserialize_with = "string_list")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub frameworks: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub databases: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub devops: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub cloud: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub testing: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tools: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub other: Vec<String>,
}

impl TechStackCategories {
    /// All entries in category order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.languages
            .iter()
            .chain(&self.frameworks)
            .chain(&self.databases)
            .chain(&self.devops)
            .chain(&self.cloud)
            .chain(&self.testing)
            .chain(&self.tools)
            .chain(&self.other)
    }

    pub fn total(&self) -> usize {
        self.iter().count()
    }
}

/// The categorized profile the extractor model is asked to return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTechStack {
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub seniority: Option<Seniority>,
    #[serde(default)]
    pub tech_stack: TechStackCategories,
    #[serde(default, deserialize_with = "string_list")]
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSelection {
    pub role_title: String,
    pub seniority: Seniority,
    pub primary_stack: Vec<String>,
    pub secondary_stack: Vec<String>,
    pub domain: String,
    pub difficulty: Seniority,
    pub focus_areas: Vec<String>,
    pub non_goals: Vec<String>,
    pub company_context_priority: String,
    pub evaluation_mode: String,
    pub deliverable_format: String,
    pub output_language: String,
    pub privacy_constraints: Vec<String>,
    pub inclusion_requirements: Vec<String>,
    pub prohibited_items: Vec<String>,
    pub extra_credit_themes: Vec<String>,
    pub technical_stack: Vec<String>,
}

const PRIMARY_STACK_SIZE: usize = 5;
const DEFAULT_ROLE_TITLE: &str = "Software Developer";

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Flattens the categories into one deduplicated list and fills in the
/// challenge defaults around it.
pub fn to_stack_selection(extracted: &ExtractedTechStack) -> StackSelection {
    let mut technical_stack: Vec<String> = Vec::new();
    for tech in extracted.tech_stack.iter() {
        let tech = tech.trim();
        if !tech.is_empty() && !technical_stack.iter().any(|t| t.eq_ignore_ascii_case(tech)) {
            technical_stack.push(tech.to_string());
        }
    }

    let split = technical_stack.len().min(PRIMARY_STACK_SIZE);
    let primary_stack = technical_stack[..split].to_vec();
    let secondary_stack = technical_stack[split..].to_vec();

    let seniority = extracted.seniority.unwrap_or_default();
    let role_title = extracted
        .role_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_ROLE_TITLE)
        .to_string();

    StackSelection {
        role_title,
        seniority,
        primary_stack,
        secondary_stack,
        domain: "Technology".to_string(),
        difficulty: seniority,
        focus_areas: owned(&[
            "Code quality and best practices",
            "Technical implementation",
            "Problem solving",
            "System design",
        ]),
        non_goals: owned(&[
            "Production deployment",
            "User authentication",
            "Payment processing",
        ]),
        company_context_priority: "strict".to_string(),
        evaluation_mode: "mixed".to_string(),
        deliverable_format: "repo".to_string(),
        output_language: "en".to_string(),
        privacy_constraints: owned(&[
            "No proprietary data",
            "No secrets in repository",
            "Use only public APIs",
        ]),
        inclusion_requirements: owned(&[
            "README with setup instructions",
            "Basic test coverage",
            "Code documentation",
        ]),
        prohibited_items: owned(&[
            "External paid APIs",
            "Embedded credentials",
            "Proprietary libraries",
        ]),
        extra_credit_themes: owned(&[
            "Performance optimization",
            "Error handling",
            "Code organization",
        ]),
        technical_stack,
    }
}

/// Shallow merge: every key of `derived` overwrites the same key in `existing`.
pub fn merge_stack_selection(
    existing: Option<StackSelectionJson>,
    derived: &StackSelection,
) -> StackSelectionJson {
    let mut merged = existing.unwrap_or_default();
    if let Ok(Value::Object(fields)) = serde_json::to_value(derived) {
        merged.extend(fields);
    }
    merged
}

/// Accepts `null`, a single string, or an array; non-string items are dropped.
fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extracted(languages: &[&str], frameworks: &[&str]) -> ExtractedTechStack {
        ExtractedTechStack {
            role_title: Some("Frontend Engineer".to_string()),
            seniority: Some(Seniority::Senior),
            tech_stack: TechStackCategories {
                languages: owned(languages),
                frameworks: owned(frameworks),
                ..Default::default()
            },
            assumptions: Vec::new(),
        }
    }

    #[test]
    fn test_lenient_deserialization() {
        let parsed: ExtractedTechStack = serde_json::from_value(json!({
            "role_title": null,
            "seniority": "Lead",
            "tech_stack": {"languages": ["Rust", 3, null], "cloud": null, "tools": "Git"},
        }))
        .unwrap();
        assert_eq!(parsed.role_title, None);
        assert_eq!(parsed.seniority, Some(Seniority::Senior));
        assert_eq!(parsed.tech_stack.languages, ["Rust"]);
        assert!(parsed.tech_stack.cloud.is_empty());
        assert_eq!(parsed.tech_stack.tools, ["Git"]);
    }

    #[test]
    fn test_seniority_labels() {
        assert_eq!(Seniority::from_label("Entry level"), Seniority::Junior);
        assert_eq!(Seniority::from_label("Staff Engineer"), Seniority::Senior);
        assert_eq!(Seniority::from_label("regular"), Seniority::Mid);
        assert_eq!(Seniority::Senior.to_string(), "senior");
    }

    #[test]
    fn test_stack_selection_splits_primary_and_secondary() {
        let selection = to_stack_selection(&extracted(
            &["TypeScript", "Rust", "Go"],
            &["React", "Axum", "Tokio", "react"],
        ));
        assert_eq!(
            selection.primary_stack,
            ["TypeScript", "Rust", "Go", "React", "Axum"]
        );
        assert_eq!(selection.secondary_stack, ["Tokio"]);
        assert_eq!(selection.technical_stack.len(), 6);
        assert_eq!(selection.difficulty, Seniority::Senior);
        assert_eq!(selection.role_title, "Frontend Engineer");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let selection = to_stack_selection(&ExtractedTechStack::default());
        assert_eq!(selection.role_title, "Software Developer");
        assert_eq!(selection.seniority, Seniority::Mid);
        assert!(selection.technical_stack.is_empty());
        assert_eq!(selection.domain, "Technology");
    }

    #[test]
    fn test_merge_derived_wins_and_extras_survive() {
        let existing = json!({
            "seniority": "junior",
            "domain": "Fintech",
            "team_size": 6,
        });
        let Value::Object(existing) = existing else {
            unreachable!()
        };
        let derived = to_stack_selection(&extracted(&["Rust"], &[]));
        let merged = merge_stack_selection(Some(existing), &derived);

        assert_eq!(merged["seniority"], "senior");
        assert_eq!(merged["domain"], "Technology");
        assert_eq!(merged["team_size"], 6);
        assert_eq!(merged["technical_stack"], json!(["Rust"]));
    }

    #[test]
    fn test_merge_without_existing() {
        let merged = merge_stack_selection(None, &to_stack_selection(&ExtractedTechStack::default()));
        assert_eq!(merged["difficulty"], "mid");
        assert_eq!(merged["deliverable_format"], "repo");
    }
}
