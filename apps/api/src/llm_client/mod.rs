/// LLM Client: the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// All LLM interactions MUST go through this module.
///
/// Provider: OpenAI Responses API. One call per request, no retries, no streaming.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Sampling temperature for every generation call.
pub const TEMPERATURE: f32 = 0.6;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Provider response. Every field is optional because the generated text may
/// surface in different places depending on the API mode that answered.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Option<Vec<OutputItem>>,
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Option<Vec<OutputContent>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputContent {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Maps a provider response to the generated text, if any.
///
/// Sources are tried in order and the first non-empty one wins:
/// 1. top-level `output_text` (Responses API convenience field)
/// 2. first text part of the first `output` item carrying content
///    (items without content, e.g. reasoning summaries, are skipped)
/// 3. `choices[0].message.content` (Chat Completions shape)
pub fn extract_output_text(response: &ProviderResponse) -> Option<String> {
    let non_empty = |s: &String| !s.trim().is_empty();

    if let Some(text) = response.output_text.as_ref().filter(|s| non_empty(s)) {
        return Some(text.clone());
    }

    let from_output = response
        .output
        .iter()
        .flatten()
        .find_map(|item| item.content.as_ref().filter(|c| !c.is_empty()))
        .and_then(|content| content.iter().find_map(|part| part.text.clone()))
        .filter(non_empty);
    if from_output.is_some() {
        return from_output;
    }

    response
        .choices
        .as_ref()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.message.as_ref())
        .and_then(|message| message.content.clone())
        .filter(non_empty)
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Seam between the request handler and the provider, so the handler can be
/// exercised against a stub.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<ProviderResponse, LlmError>;
}

/// The HTTP client for the provider's Responses endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    /// Makes a single call to the Responses API and returns the raw response object.
    async fn generate(&self, system: &str, prompt: &str) -> Result<ProviderResponse, LlmError> {
        let request_body = ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: system,
                },
                InputMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: ProviderResponse = serde_json::from_str(&body)?;
        debug!(model = %self.model, bytes = body.len(), "LLM call succeeded");

        Ok(parsed)
    }
}
