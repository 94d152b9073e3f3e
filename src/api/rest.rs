use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use warp::http::StatusCode;
use warp::hyper::body::{Buf, Bytes};
use warp::multipart::FormData;
use warp::reply::{Json, WithStatus};
use warp::Filter;

use crate::chat::{self, detect_intent, ChatIntent, Language, UNAVAILABLE_REPLY};
use crate::config::Config;
use crate::medicine::{self, MedicineError};
use crate::oracle::LanguageModel;
use crate::triage::{ConditionCandidate, RiskLevel, SymptomQuery, TriageEngine, TriageResult, TriageType};

pub const API_VERSION: &str = "2.1";
const MISSING_FIELDS: &str = "Missing required fields: symptoms, age, gender";
const INVALID_AGE: &str = "Invalid field: age must be a whole number between 1 and 150";
const MAX_AGE: u64 = 150;

type JsonReply = WithStatus<Json>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeSymptomsRequest {
    pub symptoms: Option<String>,
    pub age: Option<serde_json::Value>,
    pub gender: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("{}", MISSING_FIELDS)]
    MissingFields,
    #[error("{}", INVALID_AGE)]
    InvalidAge,
}

impl AnalyzeSymptomsRequest {
    pub fn into_query(self) -> Result<SymptomQuery, ValidationError> {
        let symptoms = non_blank(self.symptoms).ok_or(ValidationError::MissingFields)?;
        let gender = non_blank(self.gender).ok_or(ValidationError::MissingFields)?;
        let age = parse_age(self.age)?;

        Ok(SymptomQuery { symptoms, age, gender })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Absent, null, `0` and `""` count as missing; anything else must be a
/// whole number in `1..=150`.
fn parse_age(value: Option<serde_json::Value>) -> Result<u32, ValidationError> {
    use serde_json::Value;

    let age = match value {
        None | Some(Value::Null) => return Err(ValidationError::MissingFields),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(whole), _) => whole,
            (None, Some(f)) if f.fract() == 0.0 && f >= 0.0 => f as u64,
            _ => return Err(ValidationError::InvalidAge),
        },
        Some(Value::String(s)) if s.trim().is_empty() => return Err(ValidationError::MissingFields),
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| ValidationError::InvalidAge)?,
        Some(_) => return Err(ValidationError::InvalidAge),
    };

    match age {
        0 => Err(ValidationError::MissingFields),
        1..=MAX_AGE => Ok(age as u32),
        _ => Err(ValidationError::InvalidAge),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub age: u32,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_risk_label: Option<RiskLevel>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeSymptomsResponse {
    #[serde(flatten)]
    pub result: TriageResult,
    pub analysis: Analysis,
}

impl AnalyzeSymptomsResponse {
    fn new(query: SymptomQuery, result: TriageResult) -> Self {
        let analysis = Analysis {
            age: query.age,
            gender: query.gender,
            top_score: result.top_condition().and_then(ConditionCandidate::percent),
            oracle_risk_label: result.oracle_risk_label,
        };
        AnalyzeSymptomsResponse { result, analysis }
    }
}

/// Payload for rejected or failed triage requests. Always Green.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageErrorResponse {
    pub risk_level: RiskLevel,
    pub top_conditions: Vec<ConditionCandidate>,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage_type: Option<TriageType>,
}

impl TriageErrorResponse {
    fn validation(err: &ValidationError) -> Self {
        TriageErrorResponse {
            risk_level: RiskLevel::Green,
            top_conditions: Vec::new(),
            explanation: err.to_string(),
            triage_type: None,
        }
    }

    fn server_error(message: &str) -> Self {
        TriageErrorResponse {
            risk_level: RiskLevel::Green,
            top_conditions: Vec::new(),
            explanation: format!("Server error: {}", message),
            triage_type: Some(TriageType::Error),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<ChatIntent>,
}

pub struct RestApi<M> {
    engine: Arc<TriageEngine<M>>,
    max_body_bytes: u64,
    max_image_bytes: u64,
}

impl<M: LanguageModel> RestApi<M> {
    pub fn new(engine: Arc<TriageEngine<M>>, config: &Config) -> Self {
        RestApi {
            engine,
            max_body_bytes: config.api.max_body_bytes,
            max_image_bytes: config.uploads.max_image_bytes,
        }
    }

    pub fn engine(&self) -> &TriageEngine<M> {
        &self.engine
    }

    pub fn routes(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let cors = warp::cors()
            .allow_any_origin()
            .allow_methods(vec!["GET", "POST", "OPTIONS"])
            .allow_headers(vec!["content-type"]);

        self.analyze_symptoms()
            .or(self.chat())
            .unify()
            .or(self.verify_medicine())
            .unify()
            .or(health())
            .unify()
            .or(index())
            .unify()
            .recover(handle_rejection)
            .with(cors)
    }

    fn analyze_symptoms(&self) -> impl Filter<Extract = (JsonReply,), Error = warp::Rejection> + Clone {
        let engine = Arc::clone(&self.engine);

        let evaluate = warp::body::content_length_limit(self.max_body_bytes)
            .and(warp::body::bytes())
            .and_then(move |body: Bytes| {
                let engine = Arc::clone(&engine);
                async move { Ok::<JsonReply, Infallible>(analyze(engine, body).await) }
            })
            .recover(reject_triage_body)
            .unify();

        warp::path!("analyze-symptoms").and(warp::post()).and(evaluate)
    }

    fn chat(&self) -> impl Filter<Extract = (JsonReply,), Error = warp::Rejection> + Clone {
        let engine = Arc::clone(&self.engine);

        warp::path!("chat")
            .and(warp::post())
            .and(warp::body::content_length_limit(self.max_body_bytes))
            .and(warp::body::bytes())
            .and_then(move |body: Bytes| {
                let engine = Arc::clone(&engine);
                async move {
                    let request: ChatRequest = match serde_json::from_slice(&body) {
                        Ok(request) => request,
                        Err(e) => {
                            let reply = json!({ "error": format!("Invalid request body: {}", e) });
                            return Ok::<JsonReply, Infallible>(with_status(&reply, StatusCode::BAD_REQUEST));
                        }
                    };

                    let Some(message) = non_blank(request.message) else {
                        let reply = json!({ "error": "Message required" });
                        return Ok(with_status(&reply, StatusCode::BAD_REQUEST));
                    };

                    let language = Language::from_code(request.language.as_deref());
                    let intent = detect_intent(&message);

                    match chat::reply(engine.model(), &message, language).await {
                        Ok(reply) => Ok(with_status(
                            &ChatResponse { reply, intent: Some(intent) },
                            StatusCode::OK,
                        )),
                        Err(err) => {
                            error!("Chat model error: {}", err);
                            let reply = ChatResponse {
                                reply: UNAVAILABLE_REPLY.to_string(),
                                intent: None,
                            };
                            Ok(with_status(&reply, StatusCode::INTERNAL_SERVER_ERROR))
                        }
                    }
                }
            })
    }

    fn verify_medicine(&self) -> impl Filter<Extract = (JsonReply,), Error = warp::Rejection> + Clone {
        warp::path!("verify-medicine")
            .and(warp::post())
            .and(warp::multipart::form().max_length(self.max_image_bytes))
            .and_then(|form: FormData| async move {
                Ok::<JsonReply, Infallible>(verify_upload(form).await)
            })
    }
}

async fn analyze<M: LanguageModel>(engine: Arc<TriageEngine<M>>, body: Bytes) -> JsonReply {
    let request = serde_json::from_slice::<AnalyzeSymptomsRequest>(&body)
        .map_err(|e| ValidationError::InvalidBody(e.to_string()));

    let query = match request.and_then(AnalyzeSymptomsRequest::into_query) {
        Ok(query) => query,
        Err(err) => {
            warn!("Rejected triage request: {}", err);
            return with_status(&TriageErrorResponse::validation(&err), StatusCode::BAD_REQUEST);
        }
    };

    info!("Analyzing symptoms (age {}, gender {})", query.age, query.gender);

    // Own task, so a failure inside the evaluation becomes a 500 payload
    // instead of tearing down the connection.
    let task_query = query.clone();
    let evaluation = tokio::spawn(async move { engine.evaluate(&task_query).await });

    match evaluation.await {
        Ok(result) => with_status(&AnalyzeSymptomsResponse::new(query, result), StatusCode::OK),
        Err(err) => {
            error!("Error analyzing symptoms: {}", err);
            with_status(
                &TriageErrorResponse::server_error(&err.to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

/// Body rejections on the triage route still answer with a Green payload.
async fn reject_triage_body(rejection: warp::Rejection) -> Result<JsonReply, warp::Rejection> {
    let reason = if rejection.find::<warp::reject::LengthRequired>().is_some() {
        "a JSON body with a Content-Length header is required"
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        "body exceeds the size limit"
    } else {
        return Err(rejection);
    };

    let err = ValidationError::InvalidBody(reason.to_string());
    warn!("Rejected triage request: {}", err);
    Ok(with_status(&TriageErrorResponse::validation(&err), StatusCode::BAD_REQUEST))
}

async fn verify_upload(form: FormData) -> JsonReply {
    match read_image(form).await {
        Ok(image) => match medicine::verify(&image, chrono::Utc::now()) {
            Ok(verdict) => {
                info!(
                    "Medicine verification: size={}KB, confidence={}%, risk={:?}",
                    verdict.metadata.image_size_kb, verdict.confidence, verdict.risk_level
                );
                with_status(&verdict, StatusCode::OK)
            }
            Err(MedicineError::EmptyImage) => with_status(
                &json!({
                    "error": "No image provided",
                    "message": "Please upload an image of the medicine",
                }),
                StatusCode::BAD_REQUEST,
            ),
        },
        Err(err) => {
            error!("Medicine verification error: {}", err);
            with_status(
                &json!({
                    "error": "Verification failed",
                    "message": "Unable to process the image. Please try again with a clear photo.",
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

/// Collects the bytes of the `image` part; empty when there is none.
async fn read_image(mut form: FormData) -> Result<Vec<u8>, warp::Error> {
    let mut image = Vec::new();

    while let Some(mut part) = form.try_next().await? {
        if part.name() != "image" {
            continue;
        }
        while let Some(chunk) = part.data().await {
            let mut chunk = chunk?;
            while chunk.has_remaining() {
                let bytes = chunk.chunk();
                let len = bytes.len();
                image.extend_from_slice(bytes);
                chunk.advance(len);
            }
        }
        break;
    }

    Ok(image)
}

fn health() -> impl Filter<Extract = (JsonReply,), Error = warp::Rejection> + Clone {
    warp::path!("health").and(warp::get()).map(|| {
        let reply = json!({
            "status": "Symptom Triage API is running 🏥",
            "triageSystem": "rule-based-gemini",
            "chatbotEnabled": true,
            "version": API_VERSION,
        });
        with_status(&reply, StatusCode::OK)
    })
}

fn index() -> impl Filter<Extract = (JsonReply,), Error = warp::Rejection> + Clone {
    warp::path::end().and(warp::get()).map(|| {
        let reply = json!({
            "message": "Welcome to SafeCare Health API 🏥",
            "version": API_VERSION,
            "status": "running",
            "endpoints": {
                "POST /analyze-symptoms": "Symptom triage system with Gemini + rule-based detection",
                "POST /chat": "AI Healthcare Assistant chatbot",
                "POST /verify-medicine": "Medicine authenticity verification with image analysis",
                "GET /health": "Health and status check",
            },
            "chatbotEnabled": true,
        });
        with_status(&reply, StatusCode::OK)
    })
}

async fn handle_rejection(rejection: warp::Rejection) -> Result<JsonReply, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        debug!("Unhandled rejection: {:?}", rejection);
        (StatusCode::BAD_REQUEST, "Bad request".to_string())
    };

    Ok(with_status(&json!({ "error": message }), status))
}

fn with_status<T: Serialize>(body: &T, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(body), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::stub::{PanickingModel, StubModel};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn api<M: LanguageModel>(model: M) -> RestApi<M> {
        RestApi::new(Arc::new(TriageEngine::new(model)), &Config::default())
    }

    async fn post_json<M: LanguageModel>(api: &RestApi<M>, path: &str, body: Value) -> (StatusCode, Value) {
        let response = warp::test::request()
            .method("POST")
            .path(path)
            .json(&body)
            .reply(&api.routes())
            .await;
        let json = serde_json::from_slice(response.body()).unwrap();
        (response.status(), json)
    }

    fn multipart_body(boundary: &str, field: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"pill.png\"\r\nContent-Type: image/png\r\n\r\n",
            b = boundary,
            f = field
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
        body
    }

    #[tokio::test]
    async fn test_red_flag_request() {
        let api = api(StubModel::ranking("Cold", 10.0, "Mild."));
        let (status, body) = post_json(
            &api,
            "/analyze-symptoms",
            json!({ "symptoms": "I have chest pain and sweating", "age": 54, "gender": "male" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "riskLevel": "Red",
                "topConditions": [],
                "explanation": "EMERGENCY ALERT: Critical symptom detected (\"chest pain\"). Seek immediate medical attention or call emergency services.",
                "triageType": "rule-based-red",
                "detectedKeyword": "chest pain",
                "analysis": { "age": 54, "gender": "male" },
            })
        );
        assert_eq!(api.engine.model().calls(), 0);
    }

    #[tokio::test]
    async fn test_yellow_floor_request() {
        let api = api(StubModel::ranking("Viral fever", 50.0, "Monitor at home."));
        let (status, body) = post_json(
            &api,
            "/analyze-symptoms",
            json!({ "symptoms": "high fever for three days", "age": "30", "gender": "female" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["riskLevel"], "Yellow");
        assert_eq!(body["triageType"], "rule-based-gemini");
        assert_eq!(body["flags"], json!({ "redFlag": null, "yellowFlag": "high fever" }));
        assert_eq!(body["topConditions"], json!([{ "condition": "Viral fever", "confidence": 50.0 }]));
        assert_eq!(body["analysis"], json!({ "age": 30, "gender": "female", "topScore": 50 }));
    }

    #[tokio::test]
    async fn model_escalation_request() {
        let api = api(StubModel::ranking("Sinusitis", 90.0, "See a doctor."));
        let (_, body) = post_json(
            &api,
            "/analyze-symptoms",
            json!({ "symptoms": "mild runny nose", "age": 22, "gender": "male" }),
        )
        .await;
        assert_eq!(body["riskLevel"], "Red");
    }

    #[tokio::test]
    async fn test_missing_age_is_bad_request() {
        let api = api(StubModel::failing());
        let (status, body) = post_json(
            &api,
            "/analyze-symptoms",
            json!({ "symptoms": "headache", "gender": "male" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "riskLevel": "Green",
                "topConditions": [],
                "explanation": "Missing required fields: symptoms, age, gender",
            })
        );
        assert_eq!(api.engine.model().calls(), 0);
    }

    #[tokio::test]
    async fn invalid_inputs_default_to_green() {
        let api = api(StubModel::failing());

        let (status, body) = post_json(
            &api,
            "/analyze-symptoms",
            json!({ "symptoms": "headache", "age": 300, "gender": "male" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["riskLevel"], "Green");
        assert_eq!(body["explanation"], INVALID_AGE);

        let response = warp::test::request()
            .method("POST")
            .path("/analyze-symptoms")
            .body("not json")
            .reply(&api.routes())
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["riskLevel"], "Green");
        assert!(body["explanation"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_bodyless_post_is_green_bad_request() {
        let api = api(StubModel::failing());

        let response = warp::test::request()
            .method("POST")
            .path("/analyze-symptoms")
            .reply(&api.routes())
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["riskLevel"], "Green");
        assert_eq!(body["topConditions"], json!([]));
        assert!(body["explanation"].as_str().unwrap().starts_with("Invalid request body"));
        assert!(!body.to_string().contains("Rejection"));
        assert_eq!(api.engine.model().calls(), 0);
    }

    #[tokio::test]
    async fn oversized_body_is_green_bad_request() {
        let api = api(StubModel::failing());
        let symptoms = "a".repeat(Config::default().api.max_body_bytes as usize + 1);

        let (status, body) = post_json(
            &api,
            "/analyze-symptoms",
            json!({ "symptoms": symptoms, "age": 30, "gender": "male" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["riskLevel"], "Green");
        assert_eq!(body["topConditions"], json!([]));
        assert_eq!(api.engine.model().calls(), 0);
    }

    #[tokio::test]
    async fn test_oracle_failure_keeps_floor() {
        let api = api(StubModel::failing());
        let (status, body) = post_json(
            &api,
            "/analyze-symptoms",
            json!({ "symptoms": "Severe headache since noon", "age": 40, "gender": "female" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["riskLevel"], "Yellow");
        assert_eq!(body["topConditions"], json!([]));
        assert_eq!(body["triageType"], "rule-based-fallback");
    }

    #[tokio::test]
    async fn test_task_failure_is_server_error() {
        let api = api(PanickingModel);
        let (status, body) = post_json(
            &api,
            "/analyze-symptoms",
            json!({ "symptoms": "tired", "age": 40, "gender": "female" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["riskLevel"], "Green");
        assert_eq!(body["triageType"], "error");
        assert_eq!(body["topConditions"], json!([]));
        assert!(body["explanation"].as_str().unwrap().starts_with("Server error: "));
    }

    #[tokio::test]
    async fn test_chat_reply_and_intent() {
        let api = api(StubModel::replying("Please use the SOS button now."));
        let (status, body) = post_json(
            &api,
            "/chat",
            json!({ "message": "my mother is unconscious", "language": "hi" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "reply": "Please use the SOS button now.", "intent": "emergency" }));
    }

    #[tokio::test]
    async fn chat_failures() {
        let api = api(StubModel::failing());

        let (status, body) = post_json(&api, "/chat", json!({ "message": "hello" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "reply": "AI service temporarily unavailable." }));

        let (status, body) = post_json(&api, "/chat", json!({ "language": "en" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Message required" }));
    }

    #[tokio::test]
    async fn test_verify_medicine_upload() {
        let api = api(StubModel::failing());
        let boundary = "safecare-boundary";

        // byte sum 10 -> confidence 65
        let response = warp::test::request()
            .method("POST")
            .path("/verify-medicine")
            .header("content-type", format!("multipart/form-data; boundary={}", boundary))
            .body(multipart_body(boundary, "image", &[4, 6]))
            .reply(&api.routes())
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["confidence"], 65);
        assert_eq!(body["riskLevel"], "Moderate");
        assert_eq!(body["metadata"]["modelVersion"], "prototype-v1.0");
    }

    #[tokio::test]
    async fn verify_medicine_without_image() {
        let api = api(StubModel::failing());
        let boundary = "safecare-boundary";

        let response = warp::test::request()
            .method("POST")
            .path("/verify-medicine")
            .header("content-type", format!("multipart/form-data; boundary={}", boundary))
            .body(multipart_body(boundary, "document", &[1, 2, 3]))
            .reply(&api.routes())
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["error"], "No image provided");
    }

    #[tokio::test]
    async fn test_info_endpoints() {
        let api = api(StubModel::failing());

        let response = warp::test::request().path("/health").reply(&api.routes()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["triageSystem"], "rule-based-gemini");
        assert_eq!(body["version"], API_VERSION);

        let response = warp::test::request().path("/").reply(&api.routes()).await;
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "running");

        let response = warp::test::request().path("/nope").reply(&api.routes()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_age_parsing() {
        assert_eq!(parse_age(Some(json!(42))), Ok(42));
        assert_eq!(parse_age(Some(json!(42.0))), Ok(42));
        assert_eq!(parse_age(Some(json!(" 7 "))), Ok(7));
        assert_eq!(parse_age(Some(json!(150))), Ok(150));
        assert_eq!(parse_age(None), Err(ValidationError::MissingFields));
        assert_eq!(parse_age(Some(json!(0))), Err(ValidationError::MissingFields));
        assert_eq!(parse_age(Some(json!(""))), Err(ValidationError::MissingFields));
        assert_eq!(parse_age(Some(json!(151))), Err(ValidationError::InvalidAge));
        assert_eq!(parse_age(Some(json!(-3))), Err(ValidationError::InvalidAge));
        assert_eq!(parse_age(Some(json!(12.5))), Err(ValidationError::InvalidAge));
        assert_eq!(parse_age(Some(json!("ten"))), Err(ValidationError::InvalidAge));
        assert_eq!(parse_age(Some(json!(true))), Err(ValidationError::InvalidAge));
    }

    #[test]
    fn blank_symptoms_are_missing() {
        let request = AnalyzeSymptomsRequest {
            symptoms: Some("   ".to_string()),
            age: Some(json!(30)),
            gender: Some("male".to_string()),
        };
        assert_eq!(request.into_query(), Err(ValidationError::MissingFields));
    }
}
