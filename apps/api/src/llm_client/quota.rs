//! Quota / rate-limit detection for provider errors.
//!
//! The provider's error taxonomy is an external contract, so detection is substring and
//! status matching against configurable lists rather than a fixed enum.

use crate::llm_client::LlmError;

pub const DEFAULT_QUOTA_PATTERNS: &[&str] = &["429", "RESOURCE_EXHAUSTED", "quota"];
pub const DEFAULT_QUOTA_STATUS_CODES: &[u16] = &[429];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaMatcher {
    /// Matched case-insensitively against the rendered error text.
    patterns: Vec<String>,
    status_codes: Vec<u16>,
}

impl Default for QuotaMatcher {
    fn default() -> Self {
        Self::new(
            DEFAULT_QUOTA_PATTERNS.iter().map(|p| p.to_string()),
            DEFAULT_QUOTA_STATUS_CODES.iter().copied(),
        )
    }
}

impl QuotaMatcher {
    pub fn new(
        patterns: impl IntoIterator<Item = String>,
        status_codes: impl IntoIterator<Item = u16>,
    ) -> Self {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            status_codes: status_codes.into_iter().collect(),
        }
    }

    /// True when the error signals quota exhaustion or rate limiting.
    pub fn is_quota_exceeded(&self, error: &LlmError) -> bool {
        if let LlmError::Api { status, .. } = error {
            if self.status_codes.contains(status) {
                return true;
            }
        }
        self.matches_text(&error.to_string())
    }

    pub fn matches_text(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }
}
