//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::config::API_KEY_VAR;
use crate::errors::AppError;
use crate::generation::generator::generate_application;
use crate::generation::models::{GenerationRequest, GenerationResponse};
use crate::state::AppState;

/// POST /generate
///
/// Forwards the CV and job description to the provider and returns the
/// tailored résumé, cover letter and LinkedIn summary as `{"data": ...}`.
/// Without a configured credential the request is refused before any
/// network call. Bodies that are not a JSON `GenerationRequest` are
/// answered with the same `{"error": ...}` envelope as every other failure.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    let llm = state
        .llm
        .as_deref()
        .ok_or_else(|| AppError::Configuration(format!("Missing {API_KEY_VAR}")))?;

    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let data = generate_application(llm, &request).await?;
    info!(model = %state.config.openai_model, "Generated tailored application");

    Ok(Json(GenerationResponse { data }))
}
