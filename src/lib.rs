//! SafeCare: health-awareness API
//!
//! SafeCare backs the SUDHA/SafeCare app with a small HTTP service:
//! - Hybrid symptom triage (keyword flags + model confidence)
//! - A safety-constrained healthcare chat
//! - A prototype medicine authenticity check

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod medicine;
pub mod oracle;
pub mod triage;

use std::sync::Arc;

use crate::api::RestApi;
use crate::config::Config;
use crate::error::SafeCareResult;
use crate::oracle::GeminiClient;
use crate::triage::TriageEngine;

/// Wires the Gemini-backed triage engine into the REST API.
pub fn build_api(config: &Config) -> SafeCareResult<RestApi<GeminiClient>> {
    config.validate()?;
    let model = GeminiClient::new(&config.oracle)?;
    let engine = Arc::new(TriageEngine::new(model));
    Ok(RestApi::new(engine, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SafeCareError;

    #[test]
    fn test_build_api_rejects_invalid_config() {
        let mut config = Config::default();
        config.oracle.timeout_secs = 0;
        assert!(matches!(build_api(&config), Err(SafeCareError::Config(_))));
    }

    #[test]
    fn build_api_accepts_defaults_without_key() {
        let api = build_api(&Config::default()).unwrap();
        assert!(!api.engine().model().has_api_key());
        assert_eq!(api.engine().model().model(), "gemini-flash-latest");
    }

    #[test]
    fn test_blank_api_key_reports_missing() {
        let config = Config::default()
            .with_env(|key: &str| (key == "GEMINI_API_KEY").then(|| "   ".to_string()))
            .unwrap();
        assert_eq!(config.oracle.api_key.as_deref(), Some("   "));

        let api = build_api(&config).unwrap();
        assert!(!api.engine().model().has_api_key());
    }
}
