//! Parsed AI judgment of a resume.
//!
//! Models are loose with types: scores may arrive as floats, strings or out of
//! range. Scores are clamped on parse so everything downstream can rely on
//! `0..=100` (and `0..=10` for the sub-scores). An explicit `null` anywhere
//! reads as the field's default.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::{strip_json_fences, Provider};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default, deserialize_with = "percent")]
    pub score: u32,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "percent_map")]
    pub section_scores: BTreeMap<String, u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Keywords,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_analysis: ContentAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    #[serde(deserialize_with = "null_as_default")]
    pub critical_missing: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub recommended_missing: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub hard_skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub soft_skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub keyword_stuffing_detected: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub acronym_warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub action_verbs: String,
    #[serde(deserialize_with = "tenths")]
    pub quantification_score: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub buzzwords_found: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub education_feedback: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub skill_proficiency: SkillProficiency,
    #[serde(deserialize_with = "tenths")]
    pub keyword_placement_score: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub spelling_errors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub reverse_chronological_check: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillProficiency {
    #[serde(deserialize_with = "null_as_default")]
    pub expert: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub intermediate: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub beginner: Vec<String>,
}

/// Outcome of asking the providers for an evaluation. Absence is explicit:
/// there is no zeroed `EvaluationResult` standing in for "no answer".
#[derive(Debug, Clone, PartialEq)]
pub enum AiAssessment {
    Available {
        provider: Provider,
        result: EvaluationResult,
    },
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum MalformedAiResponse {
    #[error("response is not a JSON object")]
    NotJson,

    #[error("response is an empty JSON object")]
    Empty,

    #[error("response JSON does not match the evaluation schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Strips optional code fences, then requires a non-empty JSON object.
pub fn parse_evaluation(raw: &str) -> Result<EvaluationResult, MalformedAiResponse> {
    let body = strip_json_fences(raw);
    if !body.starts_with('{') {
        return Err(MalformedAiResponse::NotJson);
    }

    let value: Value = serde_json::from_str(body)?;
    if value.as_object().map_or(true, |fields| fields.is_empty()) {
        return Err(MalformedAiResponse::Empty);
    }
    Ok(serde_json::from_value(value)?)
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient fields
// ────────────────────────────────────────────────────────────────────────────

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn bounded(value: &Value, max: u32) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    // NaN saturates to 0 on the cast.
    Some(n.clamp(0.0, max as f64) as u32)
}

fn percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    bounded(&value, 100).ok_or_else(|| de::Error::custom(format!("invalid score {value}")))
}

fn tenths<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(bounded(&value, 10).unwrap_or(0))
}

/// Non-numeric section entries are dropped rather than failing the parse.
fn percent_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, u32>, D::Error> {
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(section, value)| bounded(&value, 100).map(|score| (section, score)))
        .collect())
}
