// Prompt constants for the Tech-Stack Extraction stage.

use crate::llm_client::prompts::{compose_system, JSON_ONLY_INSTRUCTION, TECHNICAL_FOCUS_INSTRUCTION};

const EXTRACTOR_ROLE: &str = "You are a tech stack extractor. You read job offers and \
    produce a normalized profile of the technologies the role requires.";

/// Extraction prompt template. Replace `{job_offer}` before sending.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Analyze the following job offer text and extract the technical stack information.

Return a JSON object with this EXACT schema:
{
  "role_title": "extracted role title",
  "seniority": "junior|mid|senior",
  "tech_stack": {
    "languages": ["list of programming languages"],
    "frameworks": ["list of frameworks and libraries"],
    "databases": ["list of databases"],
    "devops": ["list of devops and CI/CD tools"],
    "cloud": ["list of cloud services"],
    "testing": ["list of testing tools"],
    "tools": ["list of other tools"],
    "other": []
  },
  "assumptions": ["list any assumptions made"]
}

Rules:
- Use the canonical spelling of each technology (e.g. "PostgreSQL", "Node.js", "TypeScript").
- List each technology once, in the single most fitting category.
- "seniority" must be exactly one of: junior, mid, senior.
- Record every inference that is not stated explicitly in "assumptions".

Job offer text:
{job_offer}"#;

pub fn extractor_system() -> String {
    compose_system(
        EXTRACTOR_ROLE,
        &[TECHNICAL_FOCUS_INSTRUCTION, JSON_ONLY_INSTRUCTION],
    )
}

pub fn extract_prompt(job_offer: &str) -> String {
    EXTRACT_PROMPT_TEMPLATE.replace("{job_offer}", job_offer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_offer() {
        let prompt = extract_prompt("Rust engineer, Tokio, Axum");
        assert!(prompt.ends_with("Job offer text:\nRust engineer, Tokio, Axum"));
        assert!(!prompt.contains("{job_offer}"));
    }

    #[test]
    fn test_system_requires_json() {
        assert!(extractor_system().contains("valid JSON only"));
    }
}
