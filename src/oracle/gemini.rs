use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{LanguageModel, OracleError};
use crate::config::OracleConfig;

/// HTTP client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Concatenated text parts of the first candidate.
fn reply_text(response: GenerateContentResponse) -> Result<String, OracleError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(OracleError::EmptyReply);
    }
    Ok(text)
}

impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let api_key = self.api_key.as_deref().ok_or(OracleError::MissingApiKey)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("Calling {} ({} prompt chars)", self.model, prompt.len());

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    OracleError::Connection(self.endpoint.clone())
                } else if e.is_timeout() {
                    OracleError::Timeout(self.timeout_secs)
                } else {
                    OracleError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Unparsable(e.to_string()))?;

        reply_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str, api_key: Option<&str>) -> OracleConfig {
        OracleConfig {
            endpoint: endpoint.to_string(),
            model: "gemini-flash-latest".to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_client_builds_generate_url() {
        let client = GeminiClient::new(&config("https://example.test/v1beta/", Some("k"))).unwrap();
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/gemini-flash-latest:generateContent"
        );
        assert_eq!(client.model(), "gemini-flash-latest");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let client = GeminiClient::new(&config("https://example.test", Some("  "))).unwrap();
        assert!(!client.has_api_key());
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_fast() {
        let client = GeminiClient::new(&config("http://127.0.0.1:9", None)).unwrap();
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, OracleError::MissingApiKey));
    }

    #[test]
    fn reply_text_joins_first_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "Hello, "}, {"text": "world"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(reply_text(response).unwrap(), "Hello, world");
    }

    #[test]
    fn reply_text_without_candidates_is_empty_reply() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(matches!(reply_text(response), Err(OracleError::EmptyReply)));
    }
}
