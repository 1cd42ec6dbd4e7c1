use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::quota::{QuotaMatcher, DEFAULT_QUOTA_PATTERNS, DEFAULT_QUOTA_STATUS_CODES};

/// Application configuration loaded from environment variables.
/// Nothing is required: a missing `GEMINI_API_KEY` runs the service in fallback-only mode.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout: Duration,
    pub quota_patterns: Vec<String>,
    pub quota_status_codes: Vec<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: Duration::from_secs(
                std::env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            quota_patterns: match optional_env("QUOTA_ERROR_PATTERNS") {
                Some(raw) => split_list(&raw),
                None => DEFAULT_QUOTA_PATTERNS.iter().map(|p| p.to_string()).collect(),
            },
            quota_status_codes: match optional_env("QUOTA_STATUS_CODES") {
                Some(raw) => parse_status_codes(&raw)?,
                None => DEFAULT_QUOTA_STATUS_CODES.to_vec(),
            },
        })
    }

    pub fn quota_matcher(&self) -> QuotaMatcher {
        QuotaMatcher::new(
            self.quota_patterns.iter().cloned(),
            self.quota_status_codes.iter().copied(),
        )
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_status_codes(raw: &str) -> Result<Vec<u16>> {
    split_list(raw)
        .iter()
        .map(|code| {
            code.parse::<u16>()
                .with_context(|| format!("QUOTA_STATUS_CODES entry '{code}' is not a status code"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(" 429, RESOURCE_EXHAUSTED ,,quota "),
            vec!["429", "RESOURCE_EXHAUSTED", "quota"]
        );
    }

    #[test]
    fn test_parse_status_codes() {
        assert_eq!(parse_status_codes("429, 503").unwrap(), vec![429, 503]);
        assert!(parse_status_codes("429,abc").is_err());
    }

    #[test]
    fn test_quota_matcher_from_config() {
        let config = Config {
            gemini_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            llm_timeout: Duration::from_secs(60),
            quota_patterns: vec!["slow down".to_string()],
            quota_status_codes: vec![],
        };
        let matcher = config.quota_matcher();
        assert!(matcher.matches_text("Please SLOW DOWN"));
        assert!(!matcher.matches_text("429"));
    }
}
