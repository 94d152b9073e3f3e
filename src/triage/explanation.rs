use super::{ConditionCandidate, RiskLevel};

pub const DEFAULT_ASSESSMENT: &str = "Unable to provide assessment.";
pub const CONSULT_PROVIDER: &str =
    "Automated analysis is unavailable right now. Please consult a healthcare provider.";

/// Emergency notice for a red keyword match. Nothing else is appended.
pub fn emergency_notice(keyword: &str) -> String {
    format!(
        "EMERGENCY ALERT: Critical symptom detected (\"{}\"). Seek immediate medical attention or call emergency services.",
        keyword
    )
}

/// Builds the user-facing explanation for a finished triage.
///
/// `assessment` is the oracle's free-text assessment; absent text falls back
/// to a fixed placeholder. For Red and Yellow outcomes the dominant condition
/// and its rounded confidence are appended when known.
pub fn compose(
    red_flag: Option<&str>,
    yellow_flag: Option<&str>,
    risk_level: RiskLevel,
    top_conditions: &[ConditionCandidate],
    assessment: Option<&str>,
) -> String {
    if let Some(keyword) = red_flag {
        return emergency_notice(keyword);
    }

    let assessment = assessment
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(DEFAULT_ASSESSMENT);

    let mut explanation = match yellow_flag {
        Some(keyword) => format!("⚠️ Yellow flag detected (\"{}\"): {}", keyword, assessment),
        None => assessment.to_string(),
    };

    if risk_level > RiskLevel::Green {
        if let Some(top) = top_conditions.first() {
            explanation.push_str(&dominant_condition(top));
        }
    }

    explanation
}

/// Explanation for the degrade path when the oracle could not be used.
pub fn compose_fallback(yellow_flag: Option<&str>) -> String {
    compose(None, yellow_flag, RiskLevel::Green, &[], Some(CONSULT_PROVIDER))
}

fn dominant_condition(top: &ConditionCandidate) -> String {
    match top.percent() {
        Some(percent) => format!(" Most likely condition: {} ({}% confidence).", top.label, percent),
        None => format!(" Most likely condition: {}.", top.label),
    }
}
