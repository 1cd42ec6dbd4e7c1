//! Response normalizer: turns raw AI text into a schema-valid `StudyPlan`. Never fails.
//!
//! Flow: strip fences → parse JSON object → decode `PartialPlan` → default every field
//! against the request → enforce stage invariants.
//!
//! - Text that is not a JSON object becomes the motivational note of a fallback-seeded plan.
//! - Any fault after parsing discards partial work and returns `minimal_plan`.

use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::strip_json_fences;
use crate::models::plan::{RequestProfile, StudyPlan, StudyStage};
use crate::planning::fallback;
use crate::planning::partial::{NormalizeError, PartialPlan, PartialStage};
use crate::planning::PlanFailure;

const DEFAULT_STAGE_WEEKS: u32 = 2;

/// Normalizes raw AI output against the request that produced it.
pub fn normalize(raw: &str, request: &RequestProfile) -> StudyPlan {
    let partial = match decode(raw) {
        Ok(partial) => partial,
        Err(PlanFailure::Normalization(e)) => {
            warn!("AI plan could not be mapped ({e}); using minimal plan");
            return minimal_plan(request);
        }
        Err(failure) => {
            warn!("{failure}; keeping the text as motivation and seeding from fallback");
            fallback::plan_fields(request, raw.trim())
        }
    };
    normalize_partial(partial, request)
}

/// Defaults a decoded partial plan into a `StudyPlan`, falling back to `minimal_plan` on fault.
pub fn normalize_partial(partial: PartialPlan, request: &RequestProfile) -> StudyPlan {
    match build_plan(partial, request) {
        Ok(plan) => plan,
        Err(e) => {
            warn!("Plan normalization failed ({e}); using minimal plan");
            minimal_plan(request)
        }
    }
}

fn decode(raw: &str) -> Result<PartialPlan, PlanFailure> {
    let text = strip_json_fences(raw);
    let value: Value =
        serde_json::from_str(text).map_err(|e| PlanFailure::Parse(e.to_string()))?;
    let Value::Object(object) = value else {
        return Err(PlanFailure::Parse("top-level value is not an object".to_string()));
    };
    debug!("AI plan JSON parsed ({} top-level keys)", object.len());
    Ok(PartialPlan::from_object(&object)?)
}

fn build_plan(partial: PartialPlan, request: &RequestProfile) -> Result<StudyPlan, NormalizeError> {
    let mut stages: Vec<StudyStage> = partial
        .stages
        .into_iter()
        .zip(1u32..)
        .map(|(stage, position)| build_stage(stage, position))
        .collect();

    if stages.is_empty() {
        stages.push(default_stage(request));
    }
    renumber(&mut stages);
    for stage in stages.iter_mut().filter(|stage| stage.title.is_empty()) {
        stage.title = format!("Stage {}", stage.order);
    }

    let total_months = match partial.total_months {
        Some(m) if m > 0 => u32::try_from(m).unwrap_or(u32::MAX),
        _ => request.effective_months(),
    };

    let total_estimated_hours = match partial.total_estimated_hours {
        Some(h) if h > 0 => h.unsigned_abs(),
        _ => request.estimated_hours().ok_or(NormalizeError::Overflow)?,
    };

    let motivation = non_blank(partial.motivation)
        .unwrap_or_else(|| format!("Stay focused on {}!", request.career_goal));

    Ok(StudyPlan {
        career_goal: non_blank(partial.career_goal)
            .unwrap_or_else(|| request.career_goal.clone()),
        current_level: non_blank(partial.current_level)
            .unwrap_or_else(|| request.current_level.clone()),
        total_months,
        total_estimated_hours,
        stages,
        additional_resources: partial.additional_resources.unwrap_or_default(),
        success_metrics: partial.success_metrics.unwrap_or_default(),
        motivation,
    })
}

fn build_stage(stage: PartialStage, position: u32) -> StudyStage {
    StudyStage {
        order: positive(stage.order).unwrap_or(position),
        title: non_blank(stage.title).unwrap_or_default(),
        description: stage.description.unwrap_or_default(),
        duration_weeks: positive(stage.duration_weeks).unwrap_or(DEFAULT_STAGE_WEEKS),
        suggested_resources: stage.suggested_resources.unwrap_or_default(),
        developed_skills: stage.developed_skills.unwrap_or_default(),
    }
}

/// The single stage used when the AI supplied none.
fn default_stage(request: &RequestProfile) -> StudyStage {
    StudyStage {
        order: 1,
        title: "Fundamentals".to_string(),
        description: format!("Build a solid foundation in {}", request.career_goal),
        duration_weeks: 4,
        suggested_resources: vec![
            "Online courses".to_string(),
            "Official documentation".to_string(),
        ],
        developed_skills: request.leading_skills(),
    }
}

/// Keeps AI-provided orders when they already read 1..=N; otherwise sorts by the claimed
/// order (stable) and renumbers.
fn renumber(stages: &mut [StudyStage]) {
    let sequential = stages
        .iter()
        .zip(1u32..)
        .all(|(stage, expected)| stage.order == expected);
    if sequential {
        return;
    }
    debug!("AI stage orders are not sequential; renumbering");
    stages.sort_by_key(|stage| stage.order);
    for (stage, order) in stages.iter_mut().zip(1u32..) {
        stage.order = order;
    }
}

/// Last-resort plan built only from literals and saturating arithmetic on the request.
pub fn minimal_plan(request: &RequestProfile) -> StudyPlan {
    StudyPlan {
        career_goal: request.career_goal.clone(),
        current_level: request.current_level.clone(),
        total_months: request.effective_months(),
        total_estimated_hours: request.estimated_hours_saturating(),
        stages: vec![StudyStage {
            order: 1,
            title: "Study Plan".to_string(),
            description: format!("Develop your skills in {}", request.career_goal),
            duration_weeks: 4,
            suggested_resources: vec!["Online courses".to_string(), "Documentation".to_string()],
            developed_skills: request.leading_skills(),
        }],
        additional_resources: vec!["Online communities".to_string()],
        success_metrics: vec!["Project completion".to_string()],
        motivation: "Keep studying!".to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn positive(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(skills: &[&str]) -> RequestProfile {
        RequestProfile {
            career_goal: "Backend com Microservices".to_string(),
            current_level: "Intermediário".to_string(),
            current_skills: skills.iter().map(|s| s.to_string()).collect(),
            hours_per_week: 10,
            horizon_months: Some(6),
            interest_areas: None,
        }
    }

    fn orders(plan: &StudyPlan) -> Vec<u32> {
        plan.stages.iter().map(|s| s.order).collect()
    }

    const WELL_FORMED: &str = r#"```json
{
  "objetivo_carreira": "Backend Engineer",
  "nivel_atual": "Intermediário",
  "prazo_total_meses": 6,
  "horas_totais_estimadas": 200,
  "etapas": [
    {"ordem": 1, "titulo": "Spring Boot", "descricao": "REST APIs", "duracao_semanas": 8,
     "recursos_sugeridos": ["Spring docs"], "competencias_desenvolvidas": ["Java"]},
    {"ordem": 2, "titulo": "Docker", "descricao": "Containers", "duracao_semanas": 8,
     "recursos_sugeridos": [], "competencias_desenvolvidas": ["Docker"]}
  ],
  "recursos_adicionais": ["Meetups"],
  "metricas_sucesso": ["Deploy a service"],
  "motivacao": "Você consegue!"
}
```"#;

    #[test]
    fn test_well_formed_fenced_json_is_taken_verbatim() {
        let plan = normalize(WELL_FORMED, &request(&["Java", "SQL"]));
        assert_eq!(plan.career_goal, "Backend Engineer");
        assert_eq!(plan.total_estimated_hours, 200);
        assert_eq!(plan.stages.len(), 2);
        assert_eq!(plan.stages[1].title, "Docker");
        assert_eq!(plan.additional_resources, vec!["Meetups"]);
        assert_eq!(plan.motivation, "Você consegue!");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let req = request(&["Java"]);
        assert_eq!(normalize(WELL_FORMED, &req), normalize(WELL_FORMED, &req));
    }

    #[test]
    fn test_invalid_json_keeps_text_and_yields_one_default_stage() {
        let plan = normalize("not json {", &request(&[]));
        assert!(plan.motivation.contains("not json {"));
        assert_eq!(plan.stages.len(), 1);
        assert_eq!(plan.stages[0].title, "Fundamentals");
        assert_eq!(plan.stages[0].order, 1);
        assert!(plan.stages[0].developed_skills.is_empty());
        assert_eq!(plan.total_estimated_hours, 240);
    }

    #[test]
    fn test_invalid_json_motivation_is_truncated() {
        let prose = "a".repeat(500);
        let plan = normalize(&prose, &request(&[]));
        assert_eq!(plan.motivation.len(), fallback::MOTIVATION_NOTE_LIMIT);
    }

    #[test]
    fn test_empty_text_uses_template_motivation() {
        let plan = normalize("   ", &request(&[]));
        assert!(plan.motivation.contains("Backend com Microservices"));
        assert_eq!(plan.stages.len(), 1);
    }

    #[test]
    fn test_json_array_is_treated_as_parse_failure() {
        let plan = normalize("[1, 2, 3]", &request(&[]));
        assert_eq!(plan.motivation, "[1, 2, 3]");
        assert_eq!(plan.stages.len(), 1);
    }

    #[test]
    fn test_stage_defaults() {
        let raw = json!({"etapas": [{}]}).to_string();
        let plan = normalize(&raw, &request(&[]));
        let stage = &plan.stages[0];
        assert_eq!(stage.order, 1);
        assert_eq!(stage.title, "Stage 1");
        assert_eq!(stage.description, "");
        assert_eq!(stage.duration_weeks, 2);
        assert!(stage.suggested_resources.is_empty());
        assert!(stage.developed_skills.is_empty());
    }

    #[test]
    fn test_non_object_entries_do_not_shift_numbering() {
        let raw = json!({
            "etapas": ["Intro", {"titulo": "A"}, 7, {"descricao": "second"}, {}]
        })
        .to_string();
        let plan = normalize(&raw, &request(&[]));
        assert_eq!(orders(&plan), vec![1, 2, 3]);
        let titles: Vec<_> = plan.stages.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "Stage 2", "Stage 3"]);
    }

    #[test]
    fn test_default_titles_follow_final_order() {
        let raw = json!({"etapas": [{"ordem": 5, "titulo": "A"}, {}]}).to_string();
        let plan = normalize(&raw, &request(&[]));
        let stages: Vec<_> = plan
            .stages
            .iter()
            .map(|s| (s.order, s.title.as_str()))
            .collect();
        assert_eq!(stages, vec![(1, "Stage 1"), (2, "A")]);
    }

    #[test]
    fn test_backticks_inside_json_strings_keep_ai_stages() {
        let raw = r#"{"etapas":[{"titulo":"Shell","descricao":"Run ```cargo build``` daily"},{"titulo":"Docker"}],"motivacao":"Go"}"#;
        let plan = normalize(raw, &request(&[]));
        let titles: Vec<_> = plan.stages.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Shell", "Docker"]);
        assert_eq!(plan.stages[0].description, "Run ```cargo build``` daily");
        assert_eq!(plan.motivation, "Go");
    }

    #[test]
    fn test_null_lists_become_empty() {
        let raw = json!({
            "etapas": [{"titulo": "A", "recursos_sugeridos": null, "competencias_desenvolvidas": null}],
            "recursos_adicionais": null,
            "metricas_sucesso": null
        })
        .to_string();
        let plan = normalize(&raw, &request(&[]));
        assert!(plan.stages[0].suggested_resources.is_empty());
        assert!(plan.additional_resources.is_empty());
        assert!(plan.success_metrics.is_empty());
    }

    #[test]
    fn test_zero_stages_synthesizes_fundamentals_with_two_skills() {
        let raw = json!({"etapas": []}).to_string();
        let plan = normalize(&raw, &request(&["Java", "SQL", "Git"]));
        assert_eq!(plan.stages.len(), 1);
        assert_eq!(plan.stages[0].title, "Fundamentals");
        assert_eq!(plan.stages[0].duration_weeks, 4);
        assert_eq!(plan.stages[0].developed_skills, vec!["Java", "SQL"]);
        assert!(plan.stages[0].description.contains("Backend com Microservices"));
    }

    #[test]
    fn test_falsy_scalars_fall_back_to_request() {
        let raw = json!({
            "objetivo_carreira": "",
            "prazo_total_meses": 0,
            "horas_totais_estimadas": 0,
            "motivacao": "  "
        })
        .to_string();
        let plan = normalize(&raw, &request(&[]));
        assert_eq!(plan.career_goal, "Backend com Microservices");
        assert_eq!(plan.total_months, 6);
        assert_eq!(plan.total_estimated_hours, 240);
        assert_eq!(plan.motivation, "Stay focused on Backend com Microservices!");
    }

    #[test]
    fn test_out_of_order_stages_are_renumbered() {
        let raw = json!({
            "etapas": [
                {"ordem": 3, "titulo": "C"},
                {"ordem": 1, "titulo": "A"},
                {"ordem": 7, "titulo": "D"},
                {"ordem": 2, "titulo": "B"}
            ]
        })
        .to_string();
        let plan = normalize(&raw, &request(&[]));
        let titles: Vec<_> = plan.stages.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
        assert_eq!(orders(&plan), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unexpected_field_type_returns_minimal_plan() {
        let raw = json!({"prazo_total_meses": {"value": 6}, "etapas": [{"titulo": "A"}]}).to_string();
        let plan = normalize(&raw, &request(&["Java", "SQL"]));
        assert_eq!(plan, minimal_plan(&request(&["Java", "SQL"])));
        assert_eq!(plan.stages[0].title, "Study Plan");
        assert_eq!(plan.motivation, "Keep studying!");
    }

    #[test]
    fn test_hours_overflow_returns_minimal_plan() {
        let req = RequestProfile {
            hours_per_week: u32::MAX,
            horizon_months: Some(i64::MAX),
            ..request(&[])
        };
        let plan = normalize("{}", &req);
        assert_eq!(plan.stages[0].title, "Study Plan");
        assert_eq!(plan.total_estimated_hours, u64::MAX);
        assert_eq!(plan.total_months, u32::MAX);
    }

    #[test]
    fn test_fallback_round_trip_preserves_stages() {
        let req = request(&["Java", "SQL"]);
        let plan = normalize_partial(fallback::generate(&req, ""), &req);
        let json = serde_json::to_string(&plan).unwrap();
        let again = normalize(&json, &req);

        assert_eq!(again.stages.len(), plan.stages.len());
        let titles = |p: &StudyPlan| p.stages.iter().map(|s| s.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&again), titles(&plan));
        assert_eq!(again, plan);
    }
}
