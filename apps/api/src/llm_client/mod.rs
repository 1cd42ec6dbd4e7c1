/// LLM Client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Services depend on the `TextGenerator` trait; `GeminiClient` is the production backend.
///
/// Model: gemini-2.5-flash (hardcoded)
///
/// No retry loop here. A failed call is reported once and the caller decides what to substitute.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;
pub mod quota;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    /// The model stopped early (token limit, safety filter) after producing some text.
    #[error("LLM response truncated (finish reason {reason})")]
    Truncated { reason: String, partial: String },
}

impl LlmError {
    /// Text the provider produced before failing, if any.
    pub fn partial_text(&self) -> Option<&str> {
        match self {
            LlmError::Truncated { partial, .. } => Some(partial.as_str()),
            _ => None,
        }
    }
}

/// Per-call sampling and instruction settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions<'a> {
    pub system_instruction: Option<&'a str>,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
}

/// The AI collaborator seam: one prompt in, one text out, or a provider error.
///
/// Carried as `Arc<dyn TextGenerator>`; tests substitute fakes.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions<'_>,
    ) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }

    /// Turns the response into text, flagging early stops as truncation.
    pub fn into_text(self) -> Result<String, LlmError> {
        let text = self.text();
        match (self.finish_reason(), text) {
            (Some(reason), Some(partial)) if reason != "STOP" => Err(LlmError::Truncated {
                reason: reason.to_string(),
                partial,
            }),
            (_, Some(text)) => Ok(text),
            (_, None) => Err(LlmError::EmptyContent),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Extracts `"{STATUS}: {message}"` from a Gemini error body, or returns the body untouched.
fn api_error_message(body: String) -> String {
    match serde_json::from_str::<GeminiError>(&body) {
        Ok(e) => match e.error.status {
            Some(status) => format!("{status}: {}", e.error.message),
            None => e.error.message,
        },
        Err(_) => body,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Credential-bound Gemini client. Built once at startup and shared read-only.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Masked key for startup logs: first 10 and last 4 characters only.
    pub fn key_preview(&self) -> String {
        mask_key(&self.api_key)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions<'_>,
    ) -> Result<String, LlmError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiPart { text: prompt }],
            }],
            system_instruction: options.system_instruction.map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart { text }],
            }),
            generation_config: GeminiGenerationConfig {
                temperature: options.temperature,
                top_p: options.top_p,
                top_k: options.top_k,
            },
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{MODEL}:generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&response.text().await?)?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        gemini_response.into_text()
    }
}

pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 14 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
///
/// Only fences wrapping the text are removed; backticks inside a bare JSON document are content.
/// A fenced block preceded by prose ("Here is the plan: ```json ...```") yields the block.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(fenced) = text.strip_prefix("```") {
        let body = strip_fence_tag(fenced);
        return body.strip_suffix("```").unwrap_or(body).trim();
    }
    if text.starts_with('{') || text.starts_with('[') {
        return text;
    }
    let Some(start) = text.find("```") else {
        return text;
    };
    let body = strip_fence_tag(&text[start + 3..]);
    match body.rfind("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn strip_fence_tag(body: &str) -> &str {
    body.strip_prefix("json")
        .or_else(|| body.strip_prefix("JSON"))
        .unwrap_or(body)
        .trim()
}
