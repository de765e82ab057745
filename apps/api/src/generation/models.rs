use serde::{Deserialize, Serialize};

/// Request body for `/generate`. Field names follow the camelCase wire format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_desc: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// The structured application package the model is asked to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub resume_markdown: String,
    pub cover_letter_markdown: String,
    pub linkedin_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweaks: Option<Vec<String>>,
}

/// Success envelope: `{"data": GenerationResult}`.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub data: GenerationResult,
}
