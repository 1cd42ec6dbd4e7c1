//! Plan pipeline: sequences the AI call, normalization and fallback substitution.
//!
//! Flow: no client → fallback; client → prompt → generate → normalize;
//!       provider error (quota or otherwise) → fallback seeded with any partial text.
//!
//! `run` never fails. The three safety tiers are: this substitution, the normalizer's
//! prose handling, and the normalizer's minimal plan.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm_client::quota::QuotaMatcher;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::plan::{RequestProfile, StudyPlan};
use crate::planning::fallback;
use crate::planning::normalizer::{normalize, normalize_partial};
use crate::planning::prompts::{build_study_plan_prompt, STUDY_PLAN_OPTIONS};
use crate::planning::PlanFailure;

#[derive(Clone)]
pub struct PlanPipeline {
    /// `None` when no credential is configured; a valid state, not an error.
    generator: Option<Arc<dyn TextGenerator>>,
    quota: QuotaMatcher,
}

impl PlanPipeline {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, quota: QuotaMatcher) -> Self {
        Self { generator, quota }
    }

    /// Produces a study plan for the request. Always returns a structurally valid plan.
    pub async fn run(&self, request: &RequestProfile) -> StudyPlan {
        match self.generate_raw(request).await {
            Ok(raw) => {
                info!("AI plan received ({} chars); normalizing", raw.chars().count());
                normalize(&raw, request)
            }
            Err(failure) => self.substitute_fallback(request, failure),
        }
    }

    async fn generate_raw(&self, request: &RequestProfile) -> Result<String, PlanFailure> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(PlanFailure::ProviderUnavailable)?;

        let prompt = build_study_plan_prompt(request);
        generator
            .generate(&prompt, &STUDY_PLAN_OPTIONS)
            .await
            .map_err(|e| self.classify(e))
    }

    fn classify(&self, error: LlmError) -> PlanFailure {
        if self.quota.is_quota_exceeded(&error) {
            PlanFailure::QuotaExceeded { source: error }
        } else {
            PlanFailure::Provider { source: error }
        }
    }

    /// The single substitution point for every pipeline-level failure kind.
    fn substitute_fallback(&self, request: &RequestProfile, failure: PlanFailure) -> StudyPlan {
        match &failure {
            PlanFailure::ProviderUnavailable => {
                info!("AI provider not configured; using fallback plan")
            }
            PlanFailure::QuotaExceeded { .. } => {
                warn!("AI quota exhausted; using fallback plan: {failure}")
            }
            _ => warn!(
                "AI generation failed [{}]; using fallback plan: {failure}",
                failure.kind()
            ),
        }
        let ai_text = failure.partial_text().unwrap_or_default();
        normalize_partial(fallback::generate(request, ai_text), request)
    }
}
