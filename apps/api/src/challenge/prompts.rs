// Prompt constants for the Challenge Generation stage.

use crate::llm_client::prompts::{compose_system, JSON_ONLY_INSTRUCTION};

const GENERATOR_ROLE: &str = "You are a senior engineering interviewer. You design \
    take-home coding challenges that reflect the day-to-day work of a specific role, \
    can be completed in a few hours, and are graded with a transparent weighted rubric.";

/// Generation prompt template. Replace `{job_offer}` and `{stack_selection}` before sending.
pub const GENERATE_PROMPT_TEMPLATE: &str = r#"Design a coding challenge for the job offer below.

Stack selection (JSON):
{stack_selection}

Return a JSON object with this EXACT schema:
{
  "title": "short challenge title",
  "overview": "what the candidate builds and why it matters for the role",
  "difficulty_level": "junior|mid|senior",
  "requirements": {
    "functional": ["what the solution must do"],
    "non_functional": ["performance, reliability, security expectations"],
    "technical_stack": ["technologies the candidate must use"]
  },
  "deliverables": {
    "repository_format": "how the code is delivered",
    "readme_requirements": ["what the README must cover"],
    "code_structure": ["expected layout"],
    "artifacts": ["optional extra artifacts"]
  },
  "evaluation_criteria": {
    "correctness": {"weight": 0, "description": ""},
    "code_quality": {"weight": 0, "description": ""},
    "testing": {"weight": 0, "description": ""},
    "architecture": {"weight": 0, "description": ""},
    "documentation": {"weight": 0, "description": ""}
  },
  "stretch_goals": [{"title": "", "description": "", "estimated_time": ""}],
  "submission_instructions": {
    "format": "how to submit",
    "deadline": "optional",
    "contact_info": "optional",
    "additional_notes": ["optional"]
  },
  "sample_artifacts": {
    "data_samples": ["optional"],
    "schemas": ["optional"],
    "interfaces": ["optional"]
  },
  "technical_context": {
    "extracted_tools": ["tools named in the job offer"],
    "frameworks": ["frameworks named in the job offer"],
    "responsibilities": ["responsibilities the challenge exercises"]
  }
}

Rules:
- Every weight is a number from 0 to 100 and the weights add up to 100.
- "difficulty_level" follows the "difficulty" of the stack selection.
- Use the primary stack; the secondary stack is optional for the candidate.
- Respect "non_goals", "prohibited_items" and "privacy_constraints" from the stack selection.
- Include at least one functional requirement.
- Omit optional sections that do not apply.

Job offer:
{job_offer}"#;

pub fn generator_system() -> String {
    compose_system(GENERATOR_ROLE, &[JSON_ONLY_INSTRUCTION])
}

pub fn generate_prompt(job_offer: &str, stack_selection: &str) -> String {
    GENERATE_PROMPT_TEMPLATE
        .replace("{stack_selection}", stack_selection)
        .replace("{job_offer}", job_offer)
}
