// LLM prompt constants for study plan generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, LANGUAGE_INSTRUCTION};
use crate::llm_client::GenerationOptions;
use crate::models::plan::RequestProfile;

/// Balanced creativity for structured plans.
pub const STUDY_PLAN_OPTIONS: GenerationOptions<'static> = GenerationOptions {
    system_instruction: None,
    temperature: 0.7,
    top_p: Some(0.9),
    top_k: Some(40),
};

/// Study plan prompt template. Every `{placeholder}` is replaced before sending.
pub const STUDY_PLAN_PROMPT_TEMPLATE: &str = r#"You are an expert in education and career development. Create a personalized, detailed study plan.

USER PROFILE:
- Career goal: {career_goal}
- Current level: {current_level}
- Current skills: {current_skills}
- Available time: {hours_per_week} hours per week
- Desired horizon: {horizon_months} months
- Interest areas: {interest_areas}

TASKS:
1. Create a study plan structured in progressive STAGES
2. Each stage must have:
   - A clear, objective title
   - A detailed description of what will be learned
   - Duration in weeks (realistic)
   - Suggested resources (courses, books, hands-on projects)
   - Skills that will be developed
3. Compute the total time required
4. Suggest additional resources (communities, certifications, etc.)
5. Define success metrics for tracking progress
6. Include a personalized motivational message

RESPONSE FORMAT (JSON):
{
  "objetivo_carreira": "{career_goal}",
  "nivel_atual": "{current_level}",
  "prazo_total_meses": {horizon_months},
  "horas_totais_estimadas": <number>,
  "etapas": [
    {
      "ordem": 1,
      "titulo": "...",
      "descricao": "...",
      "duracao_semanas": <number>,
      "recursos_sugeridos": ["...", "..."],
      "competencias_desenvolvidas": ["...", "..."]
    }
  ],
  "recursos_adicionais": ["...", "..."],
  "metricas_sucesso": ["...", "..."],
  "motivacao": "..."
}

IMPORTANT:
- Be realistic with deadlines
- Adapt the plan to the user's current level
- Include hands-on projects in every stage
- Focus on skills relevant to the career goal
- {language_instruction}
- {json_only_instruction}
"#;

/// Renders the study plan prompt for a request.
pub fn build_study_plan_prompt(request: &RequestProfile) -> String {
    let interest_areas = match &request.interest_areas {
        Some(areas) if !areas.is_empty() => areas.join(", "),
        _ => "Not specified".to_string(),
    };

    STUDY_PLAN_PROMPT_TEMPLATE
        .replace("{career_goal}", &request.career_goal)
        .replace("{current_level}", &request.current_level)
        .replace("{current_skills}", &request.current_skills.join(", "))
        .replace("{hours_per_week}", &request.hours_per_week.to_string())
        .replace("{horizon_months}", &request.effective_months().to_string())
        .replace("{interest_areas}", &interest_areas)
        .replace("{language_instruction}", LANGUAGE_INSTRUCTION)
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
}
