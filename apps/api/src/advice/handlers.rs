//! Axum route handlers for the advice endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::profile::{JobPosting, UserProfile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    #[serde(rename = "recomendacoes")]
    pub recommendations: String,
}

#[derive(Debug, Serialize)]
pub struct JobSummaryResponse {
    #[serde(rename = "analise_vaga")]
    pub analysis: String,
}

/// POST /recomendacoes
pub async fn handle_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(profile) = payload?;
    let recommendations = state.advisor.recommend(&profile).await;
    Ok(Json(RecommendationResponse { recommendations }))
}

/// POST /resumo-vaga
pub async fn handle_job_summary(
    State(state): State<AppState>,
    payload: Result<Json<JobPosting>, JsonRejection>,
) -> Result<Json<JobSummaryResponse>, AppError> {
    let Json(posting) = payload?;
    if posting.full_description.trim().is_empty() {
        return Err(AppError::Validation(
            "descricao_completa cannot be empty".to_string(),
        ));
    }
    let analysis = state.advisor.summarize_job(&posting).await;
    Ok(Json(JobSummaryResponse { analysis }))
}
