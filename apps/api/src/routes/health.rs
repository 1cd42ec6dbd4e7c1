use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::state::AppState;

const SERVICE_NAME: &str = "career-api";

/// GET /health
/// Returns a simple status object with service version and AI availability.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE_NAME,
        "model": MODEL,
        "ai_enabled": state.config.gemini_api_key.is_some()
    }))
}

/// GET /
/// Service information and the list of endpoints.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Career AI API: study plans, course/job recommendations and job summaries",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "model": MODEL,
        "endpoints": {
            "health_check": "/health",
            "recommendations": "/recomendacoes",
            "job_summary": "/resumo-vaga",
            "study_plan": "/gerar-plano-estudos"
        }
    }))
}
