// Tailored application generation: request bounding, prompt construction,
// the single provider call, and recovery of the JSON payload from its output.
// All LLM calls go through llm_client; nothing here talks to the provider directly.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
