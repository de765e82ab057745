use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no provider credential is configured; `/generate` then
    /// answers with a configuration error without touching the network.
    pub llm: Option<Arc<dyn TextGenerator>>,
    pub config: Config,
}
