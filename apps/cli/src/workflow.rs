//! Submission flow: quota gate, one service call, usage recorded only on success.

use tracing::debug;

use crate::client::{ApplicationGenerator, ClientError};
use crate::models::{GenerationRequest, GenerationResult};
use crate::quota::QuotaTracker;

pub const LIMIT_REACHED: &str =
    "Daily free limit reached. Please try again tomorrow or run `tailor upgrade` (coming soon).";

#[derive(Debug)]
pub enum Outcome {
    /// Quota exhausted; the service was not contacted.
    LimitReached,
    Failed(ClientError),
    Generated(GenerationResult),
}

/// Status lines go to stderr so `--copy` output stays clean on stdout.
pub fn status(message: &str) {
    eprintln!("{message}");
}

pub async fn submit(
    quota: &QuotaTracker,
    daily_limit: u32,
    generator: &dyn ApplicationGenerator,
    request: &GenerationRequest,
) -> Outcome {
    if !quota.can_use_today(daily_limit) {
        return Outcome::LimitReached;
    }

    status("Thinking…");
    match generator.generate(request).await {
        Ok(result) => {
            quota.record_use();
            Outcome::Generated(result)
        }
        Err(e) => {
            if let ClientError::Server { status: code, .. } = &e {
                debug!(status = code, "generation request rejected");
            }
            Outcome::Failed(e)
        }
    }
}
