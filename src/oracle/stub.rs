use std::sync::atomic::{AtomicUsize, Ordering};

use super::{LanguageModel, OracleError};

/// Canned-reply model that counts how often it was asked.
pub struct StubModel {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StubModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Reply in the JSON shape the triage prompt asks for.
    pub fn ranking(condition: &str, confidence: f64, assessment: &str) -> Self {
        Self::replying(
            &serde_json::json!({
                "topConditions": [{ "condition": condition, "confidence": confidence }],
                "riskAssessment": assessment,
            })
            .to_string(),
        )
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LanguageModel for StubModel {
    async fn generate(&self, _prompt: &str) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| OracleError::Connection("stub".to_string()))
    }
}

/// Model whose call panics, for exercising task-failure handling.
pub struct PanickingModel;

impl LanguageModel for PanickingModel {
    async fn generate(&self, _prompt: &str) -> Result<String, OracleError> {
        panic!("model exploded")
    }
}
