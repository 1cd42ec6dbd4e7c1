// Study plan generation.
// AI call → normalize, with a deterministic fallback substituted on any failure.
// All LLM calls go through llm_client; nothing in here talks to the provider directly.

pub mod fallback;
pub mod handlers;
pub mod normalizer;
pub mod partial;
pub mod pipeline;
pub mod prompts;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::planning::partial::NormalizeError;

/// Every way the AI path can fail. None of these reach the caller; each selects a fallback tier.
#[derive(Debug, Error)]
pub enum PlanFailure {
    #[error("AI provider is not configured")]
    ProviderUnavailable,

    #[error("AI provider quota exceeded: {source}")]
    QuotaExceeded { source: LlmError },

    #[error("AI provider error: {source}")]
    Provider { source: LlmError },

    #[error("AI response is not a JSON object: {0}")]
    Parse(String),

    #[error("AI response could not be normalized: {0}")]
    Normalization(#[from] NormalizeError),
}

impl PlanFailure {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanFailure::ProviderUnavailable => "provider_unavailable",
            PlanFailure::QuotaExceeded { .. } => "quota_exceeded",
            PlanFailure::Provider { .. } => "provider_error",
            PlanFailure::Parse(_) => "parse_error",
            PlanFailure::Normalization(_) => "normalization_error",
        }
    }

    /// AI text obtained before the failure, passed through to the fallback generator.
    pub fn partial_text(&self) -> Option<&str> {
        match self {
            PlanFailure::QuotaExceeded { source } | PlanFailure::Provider { source } => {
                source.partial_text()
            }
            _ => None,
        }
    }
}
