//! Partial plan: the all-optional intermediate shape between untrusted JSON and `StudyPlan`.
//!
//! Decoding only checks types. Missing and `null` fields become `None`; defaulting and
//! truthiness rules live in the normalizer.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("field `{field}` has an unexpected type (expected {expected})")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("estimated hours overflow")]
    Overflow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialStage {
    pub order: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_weeks: Option<i64>,
    pub suggested_resources: Option<Vec<String>>,
    pub developed_skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialPlan {
    pub career_goal: Option<String>,
    pub current_level: Option<String>,
    pub total_months: Option<i64>,
    pub total_estimated_hours: Option<i64>,
    /// Only the entries that were objects, in their original relative order.
    pub stages: Vec<PartialStage>,
    pub additional_resources: Option<Vec<String>>,
    pub success_metrics: Option<Vec<String>>,
    pub motivation: Option<String>,
}

impl PartialPlan {
    /// Decodes a plan object. Non-object stage entries are dropped; a non-array `etapas` is
    /// treated as empty. Any present field of the wrong type fails the whole decode.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, NormalizeError> {
        let stages = match object.get("etapas") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(Value::as_object)
                .map(PartialStage::from_object)
                .collect::<Result<Vec<_>, _>>()?,
            _ => Vec::new(),
        };

        Ok(Self {
            career_goal: string_field(object, "objetivo_carreira")?,
            current_level: string_field(object, "nivel_atual")?,
            total_months: integer_field(object, "prazo_total_meses")?,
            total_estimated_hours: integer_field(object, "horas_totais_estimadas")?,
            stages,
            additional_resources: string_list_field(object, "recursos_adicionais")?,
            success_metrics: string_list_field(object, "metricas_sucesso")?,
            motivation: string_field(object, "motivacao")?,
        })
    }
}

impl PartialStage {
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, NormalizeError> {
        Ok(Self {
            order: integer_field(object, "ordem")?,
            title: string_field(object, "titulo")?,
            description: string_field(object, "descricao")?,
            duration_weeks: integer_field(object, "duracao_semanas")?,
            suggested_resources: string_list_field(object, "recursos_sugeridos")?,
            developed_skills: string_list_field(object, "competencias_desenvolvidas")?,
        })
    }
}

fn type_error(field: &'static str, expected: &'static str) -> NormalizeError {
    NormalizeError::FieldType { field, expected }
}

fn string_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, NormalizeError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(type_error(field, "string")),
    }
}

/// Accepts integers, integral floats (`8.0`) and numeric strings (`"8"`).
fn integer_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<i64>, NormalizeError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .map(Some)
            .ok_or_else(|| type_error(field, "integer")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| type_error(field, "integer")),
        Some(_) => Err(type_error(field, "integer")),
    }
}

fn string_list_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<Vec<String>>, NormalizeError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(type_error(field, "list of strings")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(type_error(field, "list of strings")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<PartialPlan, NormalizeError> {
        PartialPlan::from_object(value.as_object().unwrap())
    }

    #[test]
    fn test_empty_object_decodes_to_all_none() {
        assert_eq!(decode(json!({})).unwrap(), PartialPlan::default());
    }

    #[test]
    fn test_nulls_decode_to_none() {
        let partial = decode(json!({
            "motivacao": null,
            "recursos_adicionais": null,
            "etapas": [{"recursos_sugeridos": null, "ordem": null}]
        }))
        .unwrap();
        assert!(partial.motivation.is_none());
        assert!(partial.additional_resources.is_none());
        assert_eq!(partial.stages, vec![PartialStage::default()]);
    }

    #[test]
    fn test_non_object_stage_entries_are_dropped() {
        let partial = decode(json!({
            "etapas": ["intro", {"titulo": "A"}, 42, null, {"titulo": "B"}]
        }))
        .unwrap();
        let titles: Vec<_> = partial
            .stages
            .iter()
            .map(|s| s.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_non_array_stages_are_empty() {
        let partial = decode(json!({"etapas": "first learn Rust"})).unwrap();
        assert!(partial.stages.is_empty());
    }

    #[test]
    fn test_lenient_integers() {
        let partial = decode(json!({
            "prazo_total_meses": "8",
            "horas_totais_estimadas": 320.0
        }))
        .unwrap();
        assert_eq!(partial.total_months, Some(8));
        assert_eq!(partial.total_estimated_hours, Some(320));
    }

    #[test]
    fn test_fractional_integer_is_type_error() {
        let err = decode(json!({"prazo_total_meses": 6.5})).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::FieldType {
                field: "prazo_total_meses",
                expected: "integer"
            }
        );
    }

    #[test]
    fn test_wrong_type_inside_stage_fails_decode() {
        let err = decode(json!({"etapas": [{"titulo": ["not", "a", "string"]}]})).unwrap_err();
        assert!(matches!(err, NormalizeError::FieldType { field: "titulo", .. }));
    }

    #[test]
    fn test_non_string_list_item_fails_decode() {
        let err = decode(json!({"metricas_sucesso": ["ok", 3]})).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::FieldType {
                field: "metricas_sucesso",
                ..
            }
        ));
    }
}
