use tracing::{debug, info, warn};

use super::explanation::{compose, compose_fallback, emergency_notice};
use super::keywords::scan_flags;
use super::risk::{aggregate, FlagStage, RiskLevel};
use super::{SymptomQuery, TriageResult, TriageType};
use crate::oracle::{parse_assessment, triage_prompt, LanguageModel, OracleAssessment, OracleError};

/// Runs the keyword → oracle → aggregation → explanation pipeline.
///
/// The engine holds no per-request state; one instance serves all requests.
pub struct TriageEngine<M> {
    model: M,
}

impl<M: LanguageModel> TriageEngine<M> {
    pub fn new(model: M) -> Self {
        TriageEngine { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Evaluates one query. Never fails: oracle problems degrade the result
    /// to the keyword floor.
    pub async fn evaluate(&self, query: &SymptomQuery) -> TriageResult {
        debug!("Evaluating symptoms: {}", query.symptoms);
        let flags = scan_flags(&query.symptoms);

        let (floor, yellow_flag) = match FlagStage::from_flags(&flags) {
            FlagStage::Emergency { keyword } => {
                info!("Red flag detected: \"{}\", skipping model", keyword);
                return TriageResult {
                    risk_level: RiskLevel::Red,
                    top_conditions: Vec::new(),
                    explanation: emergency_notice(keyword),
                    triage_type: TriageType::RuleBasedRed,
                    flags: None,
                    detected_keyword: Some(keyword),
                    oracle_risk_label: None,
                };
            }
            FlagStage::Floor { level, yellow_flag } => (level, yellow_flag),
        };

        if let Some(keyword) = yellow_flag {
            info!("Yellow flag detected: \"{}\", risk floor set to {}", keyword, floor);
        }

        match self.rank_conditions(query).await {
            Ok(assessment) => {
                let risk_level = aggregate(floor, assessment.top_confidence());
                info!(
                    "Final risk level: {} (floor {}, top confidence {:?})",
                    risk_level,
                    floor,
                    assessment.top_confidence()
                );

                let explanation = compose(
                    None,
                    yellow_flag,
                    risk_level,
                    &assessment.top_conditions,
                    assessment.risk_assessment.as_deref(),
                );

                TriageResult {
                    risk_level,
                    top_conditions: assessment.top_conditions,
                    explanation,
                    triage_type: TriageType::RuleBasedModel,
                    flags: Some(flags),
                    detected_keyword: None,
                    oracle_risk_label: assessment.risk_label,
                }
            }
            Err(err) => {
                warn!("Condition analysis unavailable, using risk floor {}: {}", floor, err);
                TriageResult {
                    risk_level: floor,
                    top_conditions: Vec::new(),
                    explanation: compose_fallback(yellow_flag),
                    triage_type: TriageType::RuleBasedFallback,
                    flags: Some(flags),
                    detected_keyword: None,
                    oracle_risk_label: None,
                }
            }
        }
    }

    async fn rank_conditions(&self, query: &SymptomQuery) -> Result<OracleAssessment, OracleError> {
        let reply = self.model.generate(&triage_prompt(query)).await?;
        parse_assessment(&reply)
    }
}
