#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use edulearn_api::config::ServerConfig;
use edulearn_api::mailer::Mailer;
use edulearn_api::router::build_app_router;
use edulearn_api::state::AppState;
use edulearn_core::access::MissingWindowPolicy;
use edulearn_store::Seed;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        window_policy: MissingWindowPolicy::Unrestricted,
        verification_code_ttl_secs: 600,
        seed_path: None,
    }
}

/// State built from the bundled seed, with mail delivery disabled.
pub async fn build_test_state(config: ServerConfig) -> AppState {
    let seed = Seed::bundled().expect("bundled seed parses");
    AppState::from_seed(config, &seed, Mailer::Log)
        .await
        .expect("state builds")
}

/// Build the full application router with all middleware layers, exactly as
/// `main.rs` does.
pub async fn build_test_app() -> Router {
    build_test_app_with_state().await.0
}

/// Like [`build_test_app`], also returning the state so tests can inspect or
/// prime the stores.
pub async fn build_test_app_with_state() -> (Router, AppState) {
    let config = test_config();
    let state = build_test_state(config.clone()).await;
    (build_app_router(state.clone(), &config), state)
}

pub async fn build_test_app_with_config(config: ServerConfig) -> Router {
    let state = build_test_state(config.clone()).await;
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
