//! Tailored application generation: turns a (CV, job description) pair
//! into a `GenerationResult` with exactly one provider round trip.
//!
//! Flow: bound inputs → build prompts → LLM call → extract text →
//!       parse JSON (direct, then first `{...}` span) → result.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::models::{GenerationRequest, GenerationResult};
use crate::generation::prompts::{build_user_prompt, DEFAULT_ROLE, DEFAULT_TONE, GENERATION_SYSTEM};
use crate::llm_client::{extract_output_text, TextGenerator};

/// Upper bound on CV characters forwarded to the model.
pub const MAX_RESUME_CHARS: usize = 120_000;
/// Upper bound on job description characters forwarded to the model.
pub const MAX_JOB_DESC_CHARS: usize = 60_000;

/// Greedy: spans from the first `{` to the last `}` across newlines.
static JSON_OBJECT_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"));

/// Returns at most `max` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl GenerationRequest {
    /// Copy of the request with CV and job text cut to their bounds.
    pub fn bounded(&self) -> GenerationRequest {
        GenerationRequest {
            resume_text: truncate_chars(&self.resume_text, MAX_RESUME_CHARS).to_string(),
            job_desc: truncate_chars(&self.job_desc, MAX_JOB_DESC_CHARS).to_string(),
            tone: self.tone.clone(),
            role: self.role.clone(),
        }
    }

    fn role_or_default(&self) -> &str {
        self.role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_ROLE)
    }

    fn tone_or_default(&self) -> &str {
        self.tone
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TONE)
    }
}

/// Runs one generation: a single provider call, no retries, no caching.
pub async fn generate_application(
    llm: &dyn TextGenerator,
    request: &GenerationRequest,
) -> Result<GenerationResult, AppError> {
    let bounded = request.bounded();
    let prompt = build_user_prompt(
        bounded.role_or_default(),
        bounded.tone_or_default(),
        &bounded.resume_text,
        &bounded.job_desc,
    );

    info!(
        resume_chars = bounded.resume_text.chars().count(),
        job_chars = bounded.job_desc.chars().count(),
        "Requesting tailored application"
    );

    let response = llm.generate(GENERATION_SYSTEM, &prompt).await?;

    let text = extract_output_text(&response)
        .ok_or_else(|| AppError::Upstream("No output from model".to_string()))?;

    parse_generation_result(&text)
}

/// Parses model output as a `GenerationResult`.
///
/// Tries the whole text first (code fences stripped), then the first
/// `{...}` span. Fails with `MalformedModelOutput` if neither parses.
pub fn parse_generation_result(text: &str) -> Result<GenerationResult, AppError> {
    let direct_err = match serde_json::from_str::<GenerationResult>(strip_json_fences(text)) {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };

    let span = JSON_OBJECT_SPAN
        .find(text)
        .ok_or_else(|| AppError::MalformedModelOutput(format!("no JSON object found: {direct_err}")))?;

    warn!("Direct parse failed ({direct_err}); retrying on embedded JSON object");

    serde_json::from_str::<GenerationResult>(span.as_str())
        .map_err(|e| AppError::MalformedModelOutput(format!("embedded JSON object invalid: {e}")))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}
