//! Advice service: free-text course/job recommendations and job-posting summaries.
//!
//! Unlike study plans there is no structure to normalize: the model's text is returned as-is,
//! and any failure (no client, provider error, blank answer) serves a fixed offline text.

use std::sync::Arc;

use tracing::{info, warn};

use crate::advice::prompts::{
    build_job_summary_prompt, build_recommendation_prompt, JOB_SUMMARY_SYSTEM,
    JOB_SUMMARY_TEMPERATURE, OFFLINE_JOB_SUMMARY, OFFLINE_RECOMMENDATIONS,
    RECOMMENDATION_SYSTEM, RECOMMENDATION_TEMPERATURE,
};
use crate::llm_client::prompts::LANGUAGE_INSTRUCTION;
use crate::llm_client::quota::QuotaMatcher;
use crate::llm_client::{GenerationOptions, TextGenerator};
use crate::models::profile::{JobPosting, UserProfile};

#[derive(Clone)]
pub struct AdviceService {
    generator: Option<Arc<dyn TextGenerator>>,
    quota: QuotaMatcher,
}

impl AdviceService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, quota: QuotaMatcher) -> Self {
        Self { generator, quota }
    }

    pub async fn recommend(&self, profile: &UserProfile) -> String {
        let system = format!("{RECOMMENDATION_SYSTEM} {LANGUAGE_INSTRUCTION}");
        let options = GenerationOptions {
            system_instruction: Some(system.as_str()),
            temperature: RECOMMENDATION_TEMPERATURE,
            top_p: None,
            top_k: None,
        };
        let prompt = build_recommendation_prompt(profile);
        self.generate_or(&prompt, &options, OFFLINE_RECOMMENDATIONS, "recommendations")
            .await
    }

    pub async fn summarize_job(&self, posting: &JobPosting) -> String {
        let system = format!("{JOB_SUMMARY_SYSTEM} {LANGUAGE_INSTRUCTION}");
        let options = GenerationOptions {
            system_instruction: Some(system.as_str()),
            temperature: JOB_SUMMARY_TEMPERATURE,
            top_p: None,
            top_k: None,
        };
        let prompt = build_job_summary_prompt(posting);
        self.generate_or(&prompt, &options, OFFLINE_JOB_SUMMARY, "job summary")
            .await
    }

    async fn generate_or(
        &self,
        prompt: &str,
        options: &GenerationOptions<'_>,
        offline: &str,
        label: &str,
    ) -> String {
        let Some(generator) = &self.generator else {
            info!("AI provider not configured; serving offline {label}");
            return offline.to_string();
        };

        match generator.generate(prompt, options).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("AI returned blank {label}; serving offline text");
                offline.to_string()
            }
            Err(e) if self.quota.is_quota_exceeded(&e) => {
                warn!("AI quota exhausted for {label}; serving offline text: {e}");
                offline.to_string()
            }
            Err(e) => {
                warn!("AI {label} failed: {e}; serving offline text");
                offline.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::llm_client::LlmError;

    struct CannedGenerator(Result<&'static str, u16>);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            options: &GenerationOptions<'_>,
        ) -> Result<String, LlmError> {
            assert!(options
                .system_instruction
                .is_some_and(|s| s.contains(LANGUAGE_INSTRUCTION)));
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(LlmError::Api {
                    status,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn service(result: Option<Result<&'static str, u16>>) -> AdviceService {
        AdviceService::new(
            result.map(|r| Arc::new(CannedGenerator(r)) as Arc<dyn TextGenerator>),
            QuotaMatcher::default(),
        )
    }

    fn profile() -> UserProfile {
        UserProfile {
            name: "Caio".to_string(),
            age: 22,
            education_level: "Superior incompleto".to_string(),
            goals: "Dados".to_string(),
            skills: vec![],
            interests: vec![],
            iot_data: None,
        }
    }

    fn posting() -> JobPosting {
        JobPosting {
            title: "Analista Jr".to_string(),
            full_description: "SQL e Power BI".to_string(),
            profile: None,
        }
    }

    #[tokio::test]
    async fn test_recommend_returns_model_text() {
        let text = service(Some(Ok("Faça o curso X"))).recommend(&profile()).await;
        assert_eq!(text, "Faça o curso X");
    }

    #[tokio::test]
    async fn test_recommend_offline_without_client() {
        let text = service(None).recommend(&profile()).await;
        assert_eq!(text, OFFLINE_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn test_recommend_offline_on_error() {
        let text = service(Some(Err(429))).recommend(&profile()).await;
        assert_eq!(text, OFFLINE_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn test_summary_offline_on_blank_answer() {
        let text = service(Some(Ok("  \n"))).summarize_job(&posting()).await;
        assert_eq!(text, OFFLINE_JOB_SUMMARY);
    }

    #[tokio::test]
    async fn test_summary_offline_on_server_error() {
        let text = service(Some(Err(503))).summarize_job(&posting()).await;
        assert!(text.starts_with("Offline mode"));
    }
}
