//! External generative-language oracle
//!
//! The service only needs one capability from a model: turn a prompt into
//! text. Everything model-specific lives behind [`LanguageModel`]; prompt
//! construction and reply interpretation live here so they can be tested
//! against canned replies.

pub mod gemini;
#[cfg(test)]
pub(crate) mod stub;

pub use gemini::GeminiClient;

use serde::Deserialize;
use std::future::Future;

use crate::triage::parser::parse_free_text;
use crate::triage::{ConditionCandidate, RiskLevel, SymptomQuery};

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("no API key configured for the language model")]
    MissingApiKey,
    #[error("cannot reach language model at {0}")]
    Connection(String),
    #[error("language model request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    #[error("language model returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("language model returned an empty reply")]
    EmptyReply,
    #[error("could not interpret language model reply: {0}")]
    Unparsable(String),
}

/// A text-in, text-out generative model.
pub trait LanguageModel: Send + Sync + 'static {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, OracleError>> + Send;
}

/// Condition ranking extracted from a model reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleAssessment {
    pub top_conditions: Vec<ConditionCandidate>,
    pub risk_assessment: Option<String>,
    pub risk_label: Option<RiskLevel>,
}

impl OracleAssessment {
    pub fn top_confidence(&self) -> Option<f64> {
        self.top_conditions.first().and_then(|c| c.confidence)
    }

    fn is_empty(&self) -> bool {
        self.top_conditions.is_empty() && self.risk_assessment.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssessment {
    #[serde(default, alias = "conditions")]
    top_conditions: Vec<serde_json::Value>,
    #[serde(default, alias = "assessment")]
    risk_assessment: Option<String>,
    #[serde(default)]
    risk_level: Option<String>,
}

pub fn triage_prompt(query: &SymptomQuery) -> String {
    format!(
        r#"You are a medical triage assistant. Analyze the following symptoms and provide a brief assessment.

Symptoms: {}
Age: {}
Gender: {}

Respond ONLY in this JSON format (no other text):
{{
  "topConditions": [
    {{"condition": "condition name", "confidence": 75}}
  ],
  "riskAssessment": "brief risk assessment"
}}"#,
        query.symptoms, query.age, query.gender
    )
}

/// Interprets a model reply as a condition ranking.
///
/// Embedded JSON objects are tried first; prose replies go
/// through the line parser. A reply yielding neither conditions nor an
/// assessment text is an error.
pub fn parse_assessment(reply: &str) -> Result<OracleAssessment, OracleError> {
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(OracleError::EmptyReply);
    }

    if let Some(assessment) = extract_json(reply) {
        return Ok(assessment);
    }

    let parsed = parse_free_text(reply);
    let assessment = OracleAssessment {
        risk_assessment: parsed.assessment_text(),
        risk_label: parsed.risk_level,
        top_conditions: parsed.conditions,
    };

    if assessment.is_empty() {
        return Err(OracleError::Unparsable(preview(reply)));
    }
    Ok(assessment)
}

/// First `{` from which a usable assessment object deserializes; braces in
/// surrounding prose are skipped.
fn extract_json(reply: &str) -> Option<OracleAssessment> {
    reply
        .match_indices('{')
        .filter_map(|(start, _)| {
            serde_json::Deserializer::from_str(&reply[start..])
                .into_iter::<RawAssessment>()
                .next()?
                .ok()
        })
        .map(RawAssessment::into_assessment)
        .find(|assessment| !assessment.is_empty())
}

impl RawAssessment {
    fn into_assessment(self) -> OracleAssessment {
        let top_conditions = self
            .top_conditions
            .into_iter()
            .filter_map(|value| serde_json::from_value::<ConditionCandidate>(value).ok())
            .filter(|c| !c.label.trim().is_empty())
            .collect();

        OracleAssessment {
            top_conditions,
            risk_assessment: self
                .risk_assessment
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
            risk_label: self.risk_level.and_then(|label| label.parse().ok()),
        }
    }
}

fn preview(reply: &str) -> String {
    const MAX_CHARS: usize = 80;
    let mut preview: String = reply.chars().take(MAX_CHARS).collect();
    if reply.chars().count() > MAX_CHARS {
        preview.push('…');
    }
    preview
}
