use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Student profile used by the recommendation and job-summary endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "idade")]
    pub age: u32,
    #[serde(rename = "nivel_formacao")]
    pub education_level: String,
    #[serde(rename = "objetivos")]
    pub goals: String,
    #[serde(rename = "habilidades", default)]
    pub skills: Vec<String>,
    #[serde(rename = "interesses", default)]
    pub interests: Vec<String>,
    /// Opaque IoT/IoB usage data (study habits, app usage). Passed to the model verbatim.
    #[serde(rename = "dados_iot", default)]
    pub iot_data: Option<Value>,
}

/// A job posting to summarize, optionally evaluated against a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao_completa")]
    pub full_description: String,
    #[serde(rename = "perfil_usuario", default)]
    pub profile: Option<UserProfile>,
}
