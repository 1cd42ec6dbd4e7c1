pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::advice::handlers as advice;
use crate::errors::AppError;
use crate::planning::handlers as planning;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/recomendacoes", post(advice::handle_recommendations))
        .route("/resumo-vaga", post(advice::handle_job_summary))
        .route(
            "/gerar-plano-estudos",
            post(planning::handle_generate_study_plan),
        )
        .fallback(not_found)
        .with_state(state)
}
