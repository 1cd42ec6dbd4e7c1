// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every system instruction so answers reach Brazilian students in their language.
pub const LANGUAGE_INSTRUCTION: &str = "Always answer in Brazilian Portuguese.";

/// Instruction that enforces JSON-only output for structured generations.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond ONLY with valid JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations outside the JSON object.";
