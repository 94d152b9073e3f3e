//! Hybrid symptom triage
//!
//! Sorts a free-text symptom report into Red/Yellow/Green:
//! - Rule-based red/yellow keyword flags
//! - Confidence thresholds over the oracle's condition ranking
//! - A human-readable explanation of the outcome

pub mod engine;
pub mod explanation;
pub mod keywords;
pub mod parser;
pub mod risk;

pub use engine::TriageEngine;
pub use keywords::{scan, scan_flags, FlagResult, RED_FLAG_KEYWORDS, YELLOW_FLAG_KEYWORDS};
pub use risk::{aggregate, FlagStage, RiskLevel};

use serde::{Deserialize, Deserializer, Serialize};

/// A validated symptom report. Field checks happen at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomQuery {
    pub symptoms: String,
    pub age: u32,
    pub gender: String,
}

/// One ranked condition from the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCandidate {
    #[serde(rename = "condition", alias = "label", alias = "name")]
    pub label: String,
    #[serde(
        default,
        deserialize_with = "lenient_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
}

impl ConditionCandidate {
    pub fn new(label: impl Into<String>, confidence: Option<f64>) -> Self {
        ConditionCandidate {
            label: label.into(),
            confidence: confidence.and_then(normalize_confidence),
        }
    }

    /// Confidence rounded to a whole percentage, if known.
    pub fn percent(&self) -> Option<i64> {
        self.confidence.map(|c| c.round() as i64)
    }
}

/// Clamps to `[0, 100]`; non-finite values are dropped.
pub(crate) fn normalize_confidence(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value.clamp(0.0, 100.0))
    } else {
        None
    }
}

/// Parses `"72"`, `"72.5%"` and the like.
pub(crate) fn parse_confidence_text(text: &str) -> Option<f64> {
    text.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(normalize_confidence)
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().and_then(normalize_confidence),
        Some(serde_json::Value::String(s)) => parse_confidence_text(&s),
        _ => None,
    })
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriageType {
    #[serde(rename = "rule-based-red")]
    RuleBasedRed,
    #[serde(rename = "rule-based-gemini")]
    RuleBasedModel,
    #[serde(rename = "rule-based-fallback")]
    RuleBasedFallback,
    #[serde(rename = "error")]
    Error,
}

/// Outcome of one triage evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub risk_level: RiskLevel,
    pub top_conditions: Vec<ConditionCandidate>,
    pub explanation: String,
    pub triage_type: TriageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<FlagResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_keyword: Option<&'static str>,
    /// Risk label volunteered by the oracle. Informational only.
    #[serde(skip)]
    pub oracle_risk_label: Option<RiskLevel>,
}

impl TriageResult {
    pub fn top_condition(&self) -> Option<&ConditionCandidate> {
        self.top_conditions.first()
    }
}
