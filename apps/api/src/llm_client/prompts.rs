// Shared prompt fragments used by every service that asks the model for JSON.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Closing instruction that pins the response to one bare JSON object.
pub const SINGLE_JSON_OBJECT_INSTRUCTION: &str =
    "Do not include any text outside of a single JSON object.";
