use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::{ErrorEnvelope, GenerationEnvelope, GenerationRequest, GenerationResult};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response; `message` is the server's `error` field, or the
    /// status reason when the body carries none.
    #[error("{message}")]
    Server { status: u16, message: String },
}

/// Seam between the presentation flow and the service, so the flow can be
/// exercised against a stub.
#[async_trait]
pub trait ApplicationGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ClientError>;
}

/// Client for the tailoring service's `/generate` endpoint.
pub struct GenerationClient {
    client: Client,
    endpoint: String,
}

impl GenerationClient {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ApplicationGenerator for GenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ClientError> {
        let url = format!("{}/generate", self.endpoint);
        debug!(%url, "Submitting generation request");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason()),
            });
        }

        let envelope: GenerationEnvelope = response.json().await?;
        Ok(envelope.data)
    }
}

/// The server's `error` string, else the status reason.
fn error_message(body: &str, reason: Option<&str>) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| reason.unwrap_or("Request failed").to_string())
}
