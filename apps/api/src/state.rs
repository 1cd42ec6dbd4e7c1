use std::sync::Arc;

use crate::advice::service::AdviceService;
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::planning::pipeline::PlanPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub planner: PlanPipeline,
    pub advisor: AdviceService,
    pub config: Config,
}

impl AppState {
    /// Wires every service to the same process-wide generator handle.
    /// `None` means no credential was configured; each service falls back on its own.
    pub fn new(config: Config, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            planner: PlanPipeline::new(generator.clone(), config.quota_matcher()),
            advisor: AdviceService::new(generator, config.quota_matcher()),
            config,
        }
    }
}
