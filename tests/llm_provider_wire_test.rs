// ABOUTME: Wire-level tests for the Gemini and OpenAI-compatible LLM clients
// ABOUTME: Runs a local stub HTTP server and checks request shape, reply parsing, and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::mem;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use fitplan_server::config::environment::ServerConfig;
use fitplan_server::errors::ErrorCode;
use fitplan_server::llm::{
    ChatMessage, ChatRequest, GeminiProvider, LlmProvider, OpenAiCompatibleConfig,
    OpenAiCompatibleProvider,
};
use fitplan_server::models::{DayOfWeek, UserProfile};
use fitplan_server::resources::ServerResources;
use fitplan_server::server::build_router;
use fitplan_server::services::{PlanGenerationError, PlanGenerationService, PlanOutcome};
use helpers::axum_test::AxumTestRequest;
use helpers::{fenced_plan_reply, profile_body};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Requests seen by a stub server: (path or auth detail, JSON body)
#[derive(Clone, Default)]
struct Recorded(Arc<Mutex<Vec<(String, Value)>>>);

impl Recorded {
    fn push(&self, detail: String, body: Value) {
        self.0.lock().unwrap().push((detail, body));
    }

    fn take(&self) -> Vec<(String, Value)> {
        mem::take(&mut *self.0.lock().unwrap())
    }
}

async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn plan_request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You are an elite virtual personal trainer."),
        ChatMessage::user("Build a plan for Monday."),
    ])
    .with_temperature(0.7)
    .with_json_mode()
}

// ============================================================================
// Gemini
// ============================================================================

async fn gemini_generate(
    State(recorded): State<Recorded>,
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    recorded.push(format!("{target} key={key}"), body);

    if key == "exhausted-key" {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": {"code": 429, "message": "Quota exceeded. Please retry in 6.4s."}
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"weeklyPlan\": "}, {"text": "{}}"}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 8,
                "totalTokenCount": 20
            }
        })),
    )
}

fn gemini_stub(recorded: Recorded) -> Router {
    Router::new()
        .route("/models/*target", post(gemini_generate))
        .with_state(recorded)
}

#[tokio::test]
async fn test_gemini_request_shape_and_reply() {
    let recorded = Recorded::default();
    let base_url = spawn_stub(gemini_stub(recorded.clone())).await;
    let provider = GeminiProvider::new("test-key").with_base_url(format!("{base_url}/"));

    let response = provider.complete(&plan_request()).await.unwrap();

    assert_eq!(response.content, "{\"weeklyPlan\": {}}");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    let usage = response.usage.unwrap();
    assert_eq!(usage.total_tokens, 20);

    let calls = recorded.take();
    assert_eq!(calls.len(), 1);
    let (target, body) = &calls[0];
    assert_eq!(target, "gemini-2.5-flash:generateContent key=test-key");
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("personal trainer"));
    assert_eq!(body["contents"].as_array().unwrap().len(), 1);
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
}

#[tokio::test]
async fn test_gemini_quota_error_maps_to_rate_limited() {
    let base_url = spawn_stub(gemini_stub(Recorded::default())).await;
    let provider = GeminiProvider::new("exhausted-key").with_base_url(base_url);

    let err = provider.complete(&plan_request()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert!(err.message.contains("7 seconds"), "{}", err.message);
}

async fn closed_port_url() -> String {
    // Reserve a port, then free it so nothing is listening there
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn test_gemini_transport_error_does_not_expose_api_key() {
    const KEY: &str = "AIzaSy-not-for-logs-0042";
    let base_url = closed_port_url().await;
    let provider = GeminiProvider::new(KEY).with_base_url(base_url);

    let err = provider.complete(&plan_request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(!err.to_string().contains(KEY), "{err}");
    assert!(!format!("{err:?}").contains(KEY));

    let reason = PlanGenerationError::Remote(err);
    assert!(!reason.to_string().contains(KEY), "{reason}");
}

#[tokio::test]
async fn test_gemini_fallback_reason_does_not_expose_api_key() {
    const KEY: &str = "AIzaSy-fallback-secret-77";
    let provider: Arc<dyn LlmProvider> =
        Arc::new(GeminiProvider::new(KEY).with_base_url(closed_port_url().await));
    let service = PlanGenerationService::new(Some(provider));
    let profile = UserProfile::new(40, [DayOfWeek::Monday]).unwrap();

    let PlanOutcome::Fallback { reason, .. } = service.generate(&profile).await else {
        panic!("unreachable provider must fall back");
    };
    assert_eq!(reason.kind(), "remote_error");
    assert!(!reason.to_string().contains(KEY), "{reason}");
}

// ============================================================================
// OpenAI-compatible
// ============================================================================

async fn chat_completions(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    recorded.push(auth, body);

    Json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama3.1:8b",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": fenced_plan_reply()},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 30, "completion_tokens": 90, "total_tokens": 120}
    }))
}

async fn local_provider(recorded: Recorded) -> OpenAiCompatibleProvider {
    let base_url = spawn_stub(
        Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(recorded),
    )
    .await;

    OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
        base_url: format!("{base_url}/v1"),
        api_key: Some("local-secret".to_owned()),
        ..OpenAiCompatibleConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_openai_compatible_request_shape_and_reply() {
    let recorded = Recorded::default();
    let provider = local_provider(recorded.clone()).await;

    let response = provider.complete(&plan_request()).await.unwrap();

    assert_eq!(response.content, fenced_plan_reply());
    assert_eq!(response.model, "llama3.1:8b");
    assert_eq!(response.usage.unwrap().completion_tokens, 90);

    let calls = recorded.take();
    assert_eq!(calls.len(), 1);
    let (auth, body) = &calls[0];
    assert_eq!(auth, "Bearer local-secret");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "Build a plan for Monday.");
}

#[tokio::test]
async fn test_openai_compatible_unreachable_server() {
    let base_url = closed_port_url().await;

    let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
        base_url: format!("{base_url}/v1"),
        ..OpenAiCompatibleConfig::default()
    })
    .unwrap();

    let err = provider.complete(&plan_request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test]
async fn test_plan_route_through_local_provider() {
    let recorded = Recorded::default();
    let provider: Arc<dyn LlmProvider> = Arc::new(local_provider(recorded.clone()).await);
    let app = build_router(Arc::new(ServerResources::new(
        ServerConfig::default(),
        Some(provider),
    )));

    let response = AxumTestRequest::post("/generate-plan")
        .json(&profile_body(&["Monday", "Tuesday"]))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert!(body["weeklyPlan"]["Tuesday"].is_object());

    let calls = recorded.take();
    assert_eq!(calls.len(), 1);
    let prompt = calls[0].1["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("- Available Days: Monday, Tuesday"));
}
