// Shared prompt fragments.
// Each stage that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction shared by the stages that read job offers.
pub const TECHNICAL_FOCUS_INSTRUCTION: &str = "\
    Focus only on concrete technical details (languages, frameworks, libraries, tools, \
    platforms, methodologies, cloud services). Ignore non-technical content such as perks, \
    culture and HR language. Be precise, structured, and conservative in your inferences.";

/// Builds a system prompt from a role description and trailing fragments.
pub fn compose_system(role: &str, fragments: &[&str]) -> String {
    let mut system = role.trim().to_string();
    for fragment in fragments {
        system.push_str("\n\n");
        system.push_str(fragment.trim());
    }
    system
}
