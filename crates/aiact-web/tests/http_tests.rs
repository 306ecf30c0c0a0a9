//! HTTP tests for aiact-web, driving the router with scripted model replies.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aiact_classify::engine::Provider;
use aiact_classify::error::ProviderError;
use aiact_core::Settings;
use aiact_web::{build_router, AppState};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedModel {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        })
    }
}

#[async_trait]
impl Provider for ScriptedModel {
    async fn generate(&self, _system: &str, _user: &str) -> Result<String, ProviderError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ProviderError::EmptyResponse)
    }
}

struct StuckModel;

#[async_trait]
impl Provider for StuckModel {
    async fn generate(&self, _system: &str, _user: &str) -> Result<String, ProviderError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(ProviderError::EmptyResponse)
    }
}

const RECORD: &str = r#"{"sector": "Employment",
    "primary_purpose": "Screens and ranks job applicants",
    "deployment_context": "Workplace", "user_base": "Hiring managers; applicants are affected",
    "autonomy": "decision_support", "biometrics_involved": false, "biometrics_purpose": null,
    "high_risk_contexts": ["Employment decision"], "data_categories": ["Personal data"]}"#;

const VERDICT: &str = r#"{"tier": "high-risk",
    "rationale": "Recruitment ranking is listed in Annex III point 4.",
    "decision_branch": "Annex III.4",
    "reasoning": ["Employment context", "Ranks candidates", "Affects access to work"],
    "provisions": ["Annex III.4(a)"], "recommendations": ["Bias testing"], "confidence": "high"}"#;

fn form() -> Value {
    json!({
        "company": "HireTech Inc",
        "name": "AI Recruitment Tool",
        "description": "An AI system that screens job applications, ranks candidates \
            based on resume analysis, and recommends top candidates to hiring managers.",
    })
}

fn app_with(provider: Arc<dyn Provider>) -> Router {
    build_router(AppState::with_provider(Settings::default(), None, provider, None))
}

type Reply = (StatusCode, Vec<u8>, header::HeaderMap);

async fn send_body(app: Router, method: Method, uri: &str, body: Option<Vec<u8>>) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(bytes) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(bytes)
        }
        None => Body::empty(),
    };
    let response = app.oneshot(req.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, bytes, headers)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let body = body.map(|v| serde_json::to_vec(&v).unwrap());
    send_body(app, method, uri, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes, _) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_and_page_are_served() {
    let app = app_with(ScriptedModel::new(&[]));
    let (status, body, _) = send(app.clone(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, body, _) = send(app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("<option value=\"Law Enforcement\">"));
    assert!(page.contains("const MIN_CHARS = 50;"));
    assert!(!page.contains("__SECTOR_OPTIONS__"));
}

#[tokio::test]
async fn examples_are_listed() {
    let app = app_with(ScriptedModel::new(&[]));
    let (status, body) = send_json(app, Method::GET, "/api/examples", None).await;
    assert_eq!(status, StatusCode::OK);
    let examples = body.as_array().unwrap();
    assert_eq!(examples.len(), 6);
    assert_eq!(examples[1]["name"], "AI Recruitment Tool");
}

#[tokio::test]
async fn assess_returns_full_report() {
    let app = app_with(ScriptedModel::new(&[RECORD, VERDICT]));
    let (status, body) = send_json(app, Method::POST, "/api/assess", Some(form())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["classification"]["tier"], "high-risk");
    assert_eq!(body["classification"]["confidence"], "high");
    assert_eq!(body["profile"]["autonomy"], "decision_support");
    assert_eq!(body["system"]["company"], "HireTech Inc");
    assert_eq!(body["sources"], json!([]));
}

#[tokio::test]
async fn short_or_incomplete_form_is_rejected_before_the_model() {
    let model = ScriptedModel::new(&[RECORD, VERDICT]);
    let app = app_with(model.clone());

    let mut short = form();
    short["description"] = json!("Ranks candidates.");
    let (status, body) = send_json(app.clone(), Method::POST, "/api/assess", Some(short)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["retryable"], false);

    let mut nameless = form();
    nameless["name"] = json!("");
    let (status, _) = send_json(app, Method::POST, "/api/assess", Some(nameless)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(model.replies.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn undecodable_bodies_get_json_errors() {
    let model = ScriptedModel::new(&[RECORD, VERDICT]);
    let app = app_with(model.clone());

    let partial = json!({"name": "x"});
    let (status, body) = send_json(app.clone(), Method::POST, "/api/assess", Some(partial)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("description"), "{message}");

    let garbled = b"{\"company\": ".to_vec();
    let (status, bytes, headers) =
        send_body(app.clone(), Method::POST, "/api/harvest", Some(garbled)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let not_a_report = json!({"tier": "high-risk"});
    let (status, body) =
        send_json(app.clone(), Method::POST, "/api/export/text", Some(not_a_report)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = send_json(app, Method::PUT, "/api/settings", Some(json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["retryable"], false);

    assert_eq!(model.replies.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn unrecognized_tier_is_reported_with_raw_output() {
    let verdict = r#"{"tier": "medium", "rationale": "Somewhat risky."}"#;
    let app = app_with(ScriptedModel::new(&[RECORD, verdict]));
    let (status, body) = send_json(app, Method::POST, "/api/assess", Some(form())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "UNRECOGNIZED_TIER");
    assert_eq!(body["error"]["retryable"], true);
    assert_eq!(body["error"]["raw"], verdict);
}

#[tokio::test]
async fn malformed_harvest_offers_raw_for_correction() {
    let app = app_with(ScriptedModel::new(&["Sorry, I can't help with that."]));
    let (status, body) = send_json(app, Method::POST, "/api/assess", Some(form())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "HARVEST_FAILED");
    assert_eq!(body["error"]["raw"], "Sorry, I can't help with that.");
}

#[tokio::test]
async fn harvest_then_classify_corrected_record() {
    let app = app_with(ScriptedModel::new(&[RECORD, VERDICT]));
    let (status, record) =
        send_json(app.clone(), Method::POST, "/api/harvest", Some(form())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["sector"], "Employment");

    let (status, result) =
        send_json(app.clone(), Method::POST, "/api/classify", Some(record.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["tier"], "high-risk");
    assert_eq!(result["decision_branch"], "Annex III.4");

    let mut blank = record;
    blank["sector"] = json!(" ");
    let (status, body) = send_json(app, Method::POST, "/api/classify", Some(blank)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "HARVEST_FAILED");
}

#[tokio::test]
async fn corrected_record_is_checked_like_a_harvested_one() {
    let model = ScriptedModel::new(&[VERDICT]);
    let app = app_with(model.clone());

    let partial = json!({"sector": "Employment"});
    let (status, body) =
        send_json(app.clone(), Method::POST, "/api/classify", Some(partial)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "HARVEST_FAILED");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("primary_purpose"), "{message}");
    assert!(body["error"]["raw"].as_str().unwrap().contains("Employment"));

    let mut record: Value = serde_json::from_str(RECORD).unwrap();
    record.as_object_mut().unwrap().remove("biometrics_purpose");
    let (status, body) = send_json(app, Method::POST, "/api/classify", Some(record)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("biometrics_purpose"), "{message}");

    assert_eq!(model.replies.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unconfigured_provider_is_service_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(AppState::new(Settings::default(), dir.path().join("settings.json")));
    let (status, body) = send_json(app, Method::POST, "/api/assess", Some(form())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "PROVIDER_NOT_CONFIGURED");
    assert_eq!(body["error"]["retryable"], false);
}

#[tokio::test]
async fn stuck_provider_times_out() {
    let mut settings = Settings::default();
    settings.timeout_secs = 1;
    let app = build_router(AppState::with_provider(settings, None, Arc::new(StuckModel), None));
    let (status, body) = send_json(app, Method::POST, "/api/assess", Some(form())).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"]["code"], "PROVIDER_TIMEOUT");
    assert_eq!(body["error"]["retryable"], true);
}

#[tokio::test]
async fn exports_are_attachments() {
    let app = app_with(ScriptedModel::new(&[RECORD, VERDICT]));
    let (_, report) = send_json(app.clone(), Method::POST, "/api/assess", Some(form())).await;

    let (status, body, headers) =
        send(app.clone(), Method::POST, "/api/export/json", Some(report.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"AI_Recruitment_Tool_classification.json\""
    );
    let exported: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(exported, report);

    let (status, body, headers) = send(app, Method::POST, "/api/export/text", Some(report)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"AI_Recruitment_Tool_report.txt\""
    );
    let text = String::from_utf8(body).unwrap();
    assert!(text.starts_with("EU AI ACT CLASSIFICATION REPORT\n"));
    assert!(text.contains("CLASSIFICATION: High-Risk"));
    assert!(text.contains("Annex III.4(a)"));
}

#[tokio::test]
async fn settings_are_masked_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let state = AppState::with_provider(
        Settings::default(),
        Some(path.clone()),
        ScriptedModel::new(&[]),
        None,
    );
    let app = build_router(state);

    let (status, body) = send_json(app.clone(), Method::GET, "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasKey"], false);
    assert_eq!(body["configured"], false);

    let update = json!({
        "provider": "anthropic",
        "model": "claude-3-5-haiku-latest",
        "apiKey": "sk-secret",
    });
    let (status, body) = send_json(app.clone(), Method::PUT, "/api/settings", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasKey"], true);
    assert_eq!(body["configured"], true);
    assert!(!body.to_string().contains("sk-secret"));

    // Empty key keeps the stored one.
    let update = json!({
        "provider": "anthropic",
        "model": "claude-3-5-sonnet-latest",
        "apiKey": "",
        "timeoutSecs": 90,
    });
    let (_, body) = send_json(app.clone(), Method::PUT, "/api/settings", Some(update)).await;
    assert_eq!(body["hasKey"], true);
    assert_eq!(body["timeoutSecs"], 90);

    let saved = aiact_core::settings::read_settings(&path);
    assert_eq!(saved.ai.api_key, "sk-secret");
    assert_eq!(saved.ai.model, "claude-3-5-sonnet-latest");

    let bad = json!({"provider": "watson", "model": "x"});
    let (status, _) = send_json(app, Method::PUT, "/api/settings", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
