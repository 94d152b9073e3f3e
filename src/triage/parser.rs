//! Best-effort parser for prose oracle replies.
//!
//! Recognised lines, matched case-insensitively:
//! - `Risk Level: Yellow`
//! - `Assessment: ...` or `Summary: ...`
//! - numbered conditions, `1. Viral fever (70%)`, `2) Migraine - confidence 40`
//! - bulleted advice, `- drink fluids`, `* rest`, `• monitor`
//!
//! Anything else is ignored. Parsing never fails; missing parts stay empty.

use regex::Regex;
use std::sync::LazyLock;

use super::{parse_confidence_text, ConditionCandidate, RiskLevel};

static RISK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*risk[\s_-]*level\s*[:=-]\s*([a-z]+)").expect("valid risk line pattern")
});

static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:risk\s+assessment|assessment|summary)\s*:\s*(.+)$")
        .expect("valid summary line pattern")
});

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*[.)]\s+(.+)$").expect("valid numbered line pattern"));

static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*•]\s+(.+)$").expect("valid bullet line pattern"));

static TRAILING_CONFIDENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[\s(\[,:–-]*(?:confidence\s*[:=]?\s*(\d{1,3}(?:\.\d+)?)\s*%?|(\d{1,3}(?:\.\d+)?)\s*%)\s*[)\]]?\s*$",
    )
    .expect("valid confidence pattern")
});

/// Whatever could be recovered from a prose reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAssessment {
    pub risk_level: Option<RiskLevel>,
    pub conditions: Vec<ConditionCandidate>,
    pub advice: Vec<String>,
    pub summary: Option<String>,
}

impl ParsedAssessment {
    pub fn is_empty(&self) -> bool {
        self.risk_level.is_none()
            && self.conditions.is_empty()
            && self.advice.is_empty()
            && self.summary.is_none()
    }

    /// Summary line if present, otherwise the advice bullets joined.
    pub fn assessment_text(&self) -> Option<String> {
        if let Some(summary) = &self.summary {
            return Some(summary.clone());
        }
        if self.advice.is_empty() {
            None
        } else {
            Some(self.advice.join(" "))
        }
    }
}

pub fn parse_free_text(reply: &str) -> ParsedAssessment {
    let mut parsed = ParsedAssessment::default();

    for raw in reply.lines() {
        let line = raw.replace("**", "");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = RISK_LINE.captures(line) {
            if parsed.risk_level.is_none() {
                parsed.risk_level = caps[1].parse().ok();
            }
            continue;
        }

        if let Some(caps) = SUMMARY_LINE.captures(line) {
            if parsed.summary.is_none() {
                parsed.summary = Some(caps[1].trim().to_string());
            }
            continue;
        }

        if let Some(caps) = NUMBERED_LINE.captures(line) {
            if let Some(condition) = parse_condition(&caps[1]) {
                parsed.conditions.push(condition);
            }
            continue;
        }

        if let Some(caps) = BULLET_LINE.captures(line) {
            let advice = caps[1].trim();
            if !advice.is_empty() {
                parsed.advice.push(advice.to_string());
            }
        }
    }

    parsed
}

fn parse_condition(body: &str) -> Option<ConditionCandidate> {
    let caps = TRAILING_CONFIDENCE.captures(body).filter(|caps| {
        // The number must start on its own, not in the middle of `1000%` or `2.75%`.
        caps.get(1)
            .or_else(|| caps.get(2))
            .and_then(|number| body[..number.start()].chars().next_back())
            .map_or(true, |prev| !prev.is_ascii_digit() && prev != '.')
    });

    let (label, confidence) = match caps {
        Some(caps) => {
            let start = caps.get(0).map_or(body.len(), |m| m.start());
            let number = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
            (&body[..start], number.and_then(parse_confidence_text))
        }
        None => (body, None),
    };

    let label = label.trim().trim_end_matches([':', '-', '–', ',', '(']).trim();
    if label.is_empty() {
        return None;
    }

    Some(ConditionCandidate::new(label, confidence))
}
