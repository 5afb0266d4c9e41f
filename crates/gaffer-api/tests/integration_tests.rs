//! Integration tests for the Gaffer API.
//!
//! Each test builds an independent in-memory state and drives the router
//! with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use gaffer_api::create_router;
use gaffer_api::state::AppState;
use gaffer_chat::seed::default_corpus;
use gaffer_chat::{DeferredDispatcher, DialogueOrchestrator, KnowledgeBase};
use gaffer_core::config::GafferConfig;
use gaffer_core::types::FeatureRegistry;

// =============================================================================
// Helpers
// =============================================================================

/// Create a fresh AppState with the standard registry and seed corpus.
fn make_state() -> AppState {
    let config = GafferConfig::default();
    let registry = Arc::new(FeatureRegistry::standard());
    let knowledge = Arc::new(KnowledgeBase::build(default_corpus()));
    let orchestrator = DialogueOrchestrator::new(
        &config.chat,
        Arc::clone(&registry),
        knowledge,
        Arc::new(DeferredDispatcher),
    );
    AppState::new(config, orchestrator, registry)
}

/// Create a fresh router from a new state.
fn make_app() -> axum::Router {
    create_router(make_state())
}

/// Build a POST request with a JSON body.
fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

/// Read a JSON response body.
async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Router with an already-established session.
async fn logged_in_app() -> axum::Router {
    let app = make_app();
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/login",
            r#"{"team_id": 1042, "league_id": 77, "current_gameweek": 12}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    app
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_ok() {
    let resp = make_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success() {
    let resp = make_app()
        .oneshot(post_json(
            "/api/login",
            r#"{"team_id": 1042, "league_id": 77}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["team_id"], 1042);
    assert_eq!(json["league_id"], 77);
}

#[tokio::test]
async fn test_login_rejects_zero_ids() {
    let resp = make_app()
        .oneshot(post_json("/api/login", r#"{"team_id": 0, "league_id": 77}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "bad_request");
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_chat_requires_login() {
    let resp = make_app()
        .oneshot(post_json("/api/chat", r#"{"message": "hello"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_chat_empty_message_is_bad_request() {
    let app = logged_in_app().await;
    let resp = app
        .oneshot(post_json("/api/chat", r#"{"message": ""}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_chat_trigger_returns_feature_id() {
    let app = logged_in_app().await;
    let resp = app
        .oneshot(post_json(
            "/api/chat",
            r#"{"message": "Who is my captain right now?"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["featureId"], "current-captain");
    assert!(json.get("feature").is_none());
    assert!(json["reply"].as_str().unwrap().contains("Current Captain"));
}

#[tokio::test]
async fn test_chat_retrieval_path_has_no_feature_fields() {
    let app = logged_in_app().await;
    let resp = app
        .oneshot(post_json(
            "/api/chat",
            r#"{"message": "when should I use my wildcard?"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert!(json.get("feature").is_none());
    assert!(json.get("featureId").is_none());
    assert!(json["reply"]
        .as_str()
        .unwrap()
        .starts_with("Here's what I found:"));
}

#[tokio::test]
async fn test_chat_always_returns_suggestions() {
    let app = logged_in_app().await;
    let resp = app
        .oneshot(post_json("/api/chat", r#"{"message": "zzzz gibberish"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert!(!json["reply"].as_str().unwrap().is_empty());
    let suggestions = json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), FeatureRegistry::standard().len());
}

// =============================================================================
// Suggestions
// =============================================================================

#[tokio::test]
async fn test_suggestions_endpoint_mirrors_registry() {
    let resp = make_app()
        .oneshot(Request::get("/api/suggestions").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let suggestions = json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), FeatureRegistry::standard().len());
    assert_eq!(suggestions[0]["id"], "my-team-summary");
    assert!(suggestions[0]["prompt"].is_string());
}
