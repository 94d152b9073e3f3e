//! Rule-based flag detection
//!
//! Two fixed keyword tiers are matched against the lower-cased symptom text
//! by plain substring containment. List order is priority: the first keyword
//! in the list that matches is the one reported, even when a later, more
//! specific keyword also matches.

use serde::Serialize;

/// Immediate-emergency phrases. A match short-circuits the whole triage.
pub const RED_FLAG_KEYWORDS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "shortness of breath",
    "breathlessness",
    "unable to breathe",
    "unconscious",
    "unresponsive",
    "seizure",
    "convulsion",
    "fitting",
    "severe bleeding",
    "bleeding heavily",
    "hemorrhage",
    "confusion",
    "disorientation",
    "blue lips",
    "cyanosis",
    "loss of consciousness",
    "fainting",
    "syncope",
    "severe chest tightness",
    "heart attack",
    "cardiac",
    "stroke",
    "sudden paralysis",
    "poison",
    "overdose",
    "severe allergic reaction",
    "anaphylaxis",
];

/// Moderate-concern phrases. A match sets the risk floor to Yellow.
pub const YELLOW_FLAG_KEYWORDS: &[&str] = &[
    "high fever",
    "persistent fever",
    "fever for",
    "sustained fever",
    "vomiting",
    "severe headache",
    "unbearable headache",
    "stiff neck",
    "neck stiffness",
    "blood in stool",
    "bloody stool",
    "hematemesis",
    "blood in vomit",
    "coughing blood",
    "hemoptysis",
    "prolonged cough",
    "persistent cough",
    "extreme fatigue",
    "severe weakness",
    "night sweats",
    "sweating at night",
    "jaundice",
    "yellow skin",
    "yellow eyes",
    "severe abdominal pain",
    "acute abdomen",
    "severe diarrhea",
    "dysentery",
    "severe dehydration",
    "unable to drink",
    "altered mental status",
    "severe dizziness",
    "severe joint pain",
    "severe muscle pain",
    "rigidity",
    "meningeal signs",
];

/// Matched keyword per tier for a single piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagResult {
    pub red_flag: Option<&'static str>,
    pub yellow_flag: Option<&'static str>,
}

/// Returns the first keyword of `list` contained in `text`, ignoring case.
pub fn scan(text: &str, list: &'static [&'static str]) -> Option<&'static str> {
    scan_lowered(&text.to_lowercase(), list)
}

fn scan_lowered(lowered: &str, list: &'static [&'static str]) -> Option<&'static str> {
    list.iter().copied().find(|keyword| lowered.contains(keyword))
}

/// Runs the red check and, only when it misses, the yellow check.
///
/// The text is lower-cased once for both passes. When a red keyword is found
/// the yellow tier is never consulted, so `yellow_flag` stays `None`.
pub fn scan_flags(text: &str) -> FlagResult {
    let lowered = text.to_lowercase();

    if let Some(red) = scan_lowered(&lowered, RED_FLAG_KEYWORDS) {
        return FlagResult {
            red_flag: Some(red),
            yellow_flag: None,
        };
    }

    FlagResult {
        red_flag: None,
        yellow_flag: scan_lowered(&lowered, YELLOW_FLAG_KEYWORDS),
    }
}
