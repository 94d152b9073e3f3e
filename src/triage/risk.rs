//! Risk levels and the confidence-threshold aggregator.
//!
//! The aggregator implements the direct-probability policy: only the numeric
//! confidence of the top condition moves the level, and the keyword floor is a
//! hard lower bound on the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::keywords::FlagResult;

/// Top confidence strictly above this forces Red.
pub const RED_CONFIDENCE_THRESHOLD: f64 = 85.0;
/// Top confidence strictly above this lifts a Green floor to Yellow.
pub const ESCALATION_CONFIDENCE_THRESHOLD: f64 = 65.0;

/// Ordinal urgency tier. Variant order defines `Green < Yellow < Red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Green => "Green",
            RiskLevel::Yellow => "Yellow",
            RiskLevel::Red => "Red",
        };
        f.write_str(name)
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    /// Accepts colour names and the usual low/moderate/high wording.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "green" | "low" => Ok(RiskLevel::Green),
            "yellow" | "moderate" | "medium" => Ok(RiskLevel::Yellow),
            "red" | "high" | "emergency" => Ok(RiskLevel::Red),
            other => Err(format!("Unknown risk level: {}", other)),
        }
    }
}

/// Outcome of the keyword stage, before any model signal is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagStage {
    /// A red keyword matched; the evaluation is finished at Red.
    Emergency { keyword: &'static str },
    /// No red keyword; the result may not drop below `level`.
    Floor {
        level: RiskLevel,
        yellow_flag: Option<&'static str>,
    },
}

impl FlagStage {
    pub fn from_flags(flags: &FlagResult) -> Self {
        if let Some(keyword) = flags.red_flag {
            return FlagStage::Emergency { keyword };
        }

        match flags.yellow_flag {
            Some(keyword) => FlagStage::Floor {
                level: RiskLevel::Yellow,
                yellow_flag: Some(keyword),
            },
            None => FlagStage::Floor {
                level: RiskLevel::Green,
                yellow_flag: None,
            },
        }
    }
}

/// Level suggested by the model's top confidence alone.
pub fn model_level(top_confidence: Option<f64>) -> RiskLevel {
    match top_confidence {
        Some(c) if c > RED_CONFIDENCE_THRESHOLD => RiskLevel::Red,
        Some(c) if c > ESCALATION_CONFIDENCE_THRESHOLD => RiskLevel::Yellow,
        _ => RiskLevel::Green,
    }
}

/// Final level: the model level, never below `floor`.
pub fn aggregate(floor: RiskLevel, top_confidence: Option<f64>) -> RiskLevel {
    floor.max(model_level(top_confidence))
}
