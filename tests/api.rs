//! REST API integration tests
//!
//! Drives the real router with in-process requests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use statehub::auth::AuthService;
use statehub::realtime_hub::RealtimeHub;
use statehub::state::{AppConfig, AppState};
use statehub::state_engine::{StateEngine, StateRepository};
use statehub::web_api;
use std::sync::Arc;
use tower::ServiceExt;

const DEMO_USER: &str = "user@example.com";
const DEMO_PASSWORD: &str = "656frfRRf";

fn test_app() -> Router {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        demo_username: DEMO_USER.to_string(),
        demo_password: DEMO_PASSWORD.to_string(),
    };

    let state = AppState {
        config,
        engine: Arc::new(StateEngine::new(StateRepository::new())),
        realtime: Arc::new(RealtimeHub::new()),
        auth: Arc::new(AuthService::new(DEMO_USER, DEMO_PASSWORD)),
    };

    web_api::create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_heartbeat_reports_alive() {
    let app = test_app();

    let response = app.oneshot(get("/api/heartbeat")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "alive");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_get_state_returns_default_for_unwritten_namespace() {
    let app = test_app();

    let response = app.oneshot(get("/api/state/fresh")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["content"], "Default state for fresh");
    assert_eq!(body["namespace"], "fresh");
}

#[tokio::test]
async fn test_post_message_echoes_processed_record() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/api/message/chat",
            &json!({"content": "hello", "namespace": "chat"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["content"], "olleh");
    assert_eq!(body["namespace"], "chat");
}

#[tokio::test]
async fn test_read_after_write_over_http() {
    let app = test_app();

    app.clone()
        .oneshot(post_json(
            "/api/message/chat",
            &json!({"content": "hello", "namespace": "chat"}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/state/chat")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["content"], "olleh");
    assert_eq!(body["namespace"], "chat");
}

#[tokio::test]
async fn test_payload_namespace_is_overridden_by_path() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/message/A",
            &json!({"content": "x", "namespace": "B"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["namespace"], "A");

    let response = app.oneshot(get("/api/state/B")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["content"], "Default state for B");
}

#[tokio::test]
async fn test_missing_content_is_treated_as_empty() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/api/message/chat", &json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["content"], "");
    assert_eq!(body["namespace"], "chat");
}

#[tokio::test]
async fn test_login_then_me_then_logout() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            &json!({"username": DEMO_USER, "password": DEMO_PASSWORD}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["username"], DEMO_USER);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Demo User");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/auth/login",
            &json!({"username": DEMO_USER, "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error_code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let app = test_app();

    let response = app.oneshot(get("/auth/me")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_state_routes_require_no_credential() {
    let app = test_app();

    // Reads and writes work without any Authorization header
    let response = app
        .clone()
        .oneshot(post_json("/api/message/open", &json!({"content": "hi"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/state/open")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
