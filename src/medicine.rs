//! Prototype medicine authenticity check.
//!
//! There is no vision model here: the confidence is a deterministic function
//! of the uploaded bytes, mapped onto three risk bands with canned guidance.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub const MODEL_VERSION: &str = "prototype-v1.0";
const HASH_MODULUS: u64 = 10_000;
const CONFIDENCE_BASE: u32 = 55;
const CONFIDENCE_SPAN: u64 = 34;

#[derive(Debug, thiserror::Error)]
pub enum MedicineError {
    #[error("no image provided")]
    EmptyImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MedicineRisk {
    High,
    Moderate,
    Low,
}

impl MedicineRisk {
    /// `<65` High, `65..=75` Moderate, `>75` Low.
    pub fn from_confidence(confidence: u32) -> Self {
        match confidence {
            c if c < 65 => MedicineRisk::High,
            65..=75 => MedicineRisk::Moderate,
            _ => MedicineRisk::Low,
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            MedicineRisk::High => {
                "⚠️ High Risk Detected\n\n\
                 • Minor packaging inconsistencies detected\n\
                 • Label print clarity variation observed\n\
                 • Alignment irregularity noted\n\
                 • Hologram authenticity uncertain\n\n\
                 ⚡ Action Required: Please consult a licensed pharmacist or contact the manufacturer directly for verification."
            }
            MedicineRisk::Moderate => {
                "⚡ Moderate Risk - Manual Verification Recommended\n\n\
                 • Packaging structure largely consistent\n\
                 • Slight contrast variation detected in labeling\n\
                 • Color saturation within acceptable range\n\
                 • Minor discrepancies in font rendering\n\n\
                 💡 Recommendation: Compare with a known authentic sample or verify batch number with manufacturer."
            }
            MedicineRisk::Low => {
                "✅ Low Risk - Appears Authentic\n\n\
                 • Packaging structure consistent with standards\n\
                 • Label alignment within normal parameters\n\
                 • No major visual discrepancies detected\n\
                 • Print quality meets expected criteria\n\n\
                 📋 Note: This analysis is based on visual assessment. For complete assurance, verify batch details with the official manufacturer database."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMetadata {
    #[serde(rename = "imageSizeKB")]
    pub image_size_kb: String,
    pub processed_at: String,
    pub model_version: &'static str,
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineVerdict {
    pub confidence: u32,
    pub risk_level: MedicineRisk,
    pub message: &'static str,
    pub metadata: VerificationMetadata,
}

/// Sum of all byte values, reduced modulo 10000.
pub fn image_hash(image: &[u8]) -> u64 {
    image.iter().map(|&b| u64::from(b)).sum::<u64>() % HASH_MODULUS
}

/// Confidence in `55..=88`.
pub fn confidence_for(image: &[u8]) -> u32 {
    CONFIDENCE_BASE + (image_hash(image) % CONFIDENCE_SPAN) as u32
}

pub fn verify(image: &[u8], processed_at: DateTime<Utc>) -> Result<MedicineVerdict, MedicineError> {
    if image.is_empty() {
        return Err(MedicineError::EmptyImage);
    }

    let confidence = confidence_for(image);
    let risk_level = MedicineRisk::from_confidence(confidence);

    Ok(MedicineVerdict {
        confidence,
        risk_level,
        message: risk_level.guidance(),
        metadata: VerificationMetadata {
            image_size_kb: format!("{:.2}", image.len() as f64 / 1024.0),
            processed_at: processed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            model_version: MODEL_VERSION,
            note: "This is a simulated analysis for prototype demonstration",
        },
    })
}
