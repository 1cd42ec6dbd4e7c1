use serde::{Deserialize, Serialize};

/// Horizon used whenever the request omits one or sends a non-positive value.
pub const DEFAULT_HORIZON_MONTHS: u32 = 6;

/// Weeks counted per month when estimating study hours.
pub const WEEKS_PER_MONTH: u64 = 4;

/// Inbound profile for study plan generation. Immutable for the duration of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestProfile {
    #[serde(rename = "objetivo_carreira")]
    pub career_goal: String,
    /// Free-form: "Iniciante", "Intermediário", "Avançado", ...
    #[serde(rename = "nivel_atual")]
    pub current_level: String,
    #[serde(rename = "competencias_atuais", default)]
    pub current_skills: Vec<String>,
    #[serde(rename = "tempo_disponivel_semana")]
    pub hours_per_week: u32,
    #[serde(rename = "prazo_meses", default)]
    pub horizon_months: Option<i64>,
    #[serde(rename = "areas_interesse", default)]
    pub interest_areas: Option<Vec<String>>,
}

impl RequestProfile {
    /// Horizon in months with absent or non-positive values mapped to the 6-month default.
    pub fn effective_months(&self) -> u32 {
        match self.horizon_months {
            Some(months) if months > 0 => u32::try_from(months).unwrap_or(u32::MAX),
            _ => DEFAULT_HORIZON_MONTHS,
        }
    }

    /// hours_per_week × effective_months × 4, or `None` on overflow.
    pub fn estimated_hours(&self) -> Option<u64> {
        u64::from(self.hours_per_week)
            .checked_mul(u64::from(self.effective_months()))?
            .checked_mul(WEEKS_PER_MONTH)
    }

    /// Same estimate as [`estimated_hours`](Self::estimated_hours), clamped instead of failing.
    pub fn estimated_hours_saturating(&self) -> u64 {
        u64::from(self.hours_per_week)
            .saturating_mul(u64::from(self.effective_months()))
            .saturating_mul(WEEKS_PER_MONTH)
    }

    /// The first two current skills, or nothing when fewer than two are known.
    pub fn leading_skills(&self) -> Vec<String> {
        if self.current_skills.len() >= 2 {
            self.current_skills[..2].to_vec()
        } else {
            Vec::new()
        }
    }
}

/// One ordered phase of a study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyStage {
    #[serde(rename = "ordem")]
    pub order: u32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "duracao_semanas")]
    pub duration_weeks: u32,
    #[serde(rename = "recursos_sugeridos")]
    pub suggested_resources: Vec<String>,
    #[serde(rename = "competencias_desenvolvidas")]
    pub developed_skills: Vec<String>,
}

/// The validated plan returned to callers.
///
/// Invariants: `stages` is never empty, stage orders run 1..=N, `total_months` and every
/// `duration_weeks` are positive, `motivation` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    #[serde(rename = "objetivo_carreira")]
    pub career_goal: String,
    #[serde(rename = "nivel_atual")]
    pub current_level: String,
    #[serde(rename = "prazo_total_meses")]
    pub total_months: u32,
    #[serde(rename = "horas_totais_estimadas")]
    pub total_estimated_hours: u64,
    #[serde(rename = "etapas")]
    pub stages: Vec<StudyStage>,
    #[serde(rename = "recursos_adicionais")]
    pub additional_resources: Vec<String>,
    #[serde(rename = "metricas_sucesso")]
    pub success_metrics: Vec<String>,
    #[serde(rename = "motivacao")]
    pub motivation: String,
}
