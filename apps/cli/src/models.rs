use serde::{Deserialize, Serialize};

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub resume_text: String,
    pub job_desc: String,
    pub tone: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationResult {
    pub resume_markdown: String,
    pub cover_letter_markdown: String,
    pub linkedin_summary: String,
    #[serde(default)]
    pub key_skills: Option<Vec<String>>,
    #[serde(default)]
    pub tweaks: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationEnvelope {
    pub data: GenerationResult,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<String>,
}
