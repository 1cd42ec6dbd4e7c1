//! Axum route handler for study plan generation.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::models::plan::{RequestProfile, StudyPlan};
use crate::state::AppState;

/// POST /gerar-plano-estudos
///
/// Always answers 200 with a valid plan once the profile passes validation; AI failures are
/// absorbed by the pipeline.
pub async fn handle_generate_study_plan(
    State(state): State<AppState>,
    payload: Result<Json<RequestProfile>, JsonRejection>,
) -> Result<Json<StudyPlan>, AppError> {
    let Json(request) = payload?;
    validate_request(&request)?;

    let plan = state.planner.run(&request).await;
    Ok(Json(plan))
}

fn validate_request(request: &RequestProfile) -> Result<(), AppError> {
    if request.career_goal.trim().is_empty() {
        return Err(AppError::Validation(
            "objetivo_carreira cannot be empty".to_string(),
        ));
    }
    if request.hours_per_week == 0 {
        return Err(AppError::Validation(
            "tempo_disponivel_semana must be a positive number of hours".to_string(),
        ));
    }
    Ok(())
}
