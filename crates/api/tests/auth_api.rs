//! HTTP-level integration tests for the `/auth` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use edulearn_api::state::AppState;
use serde_json::json;

// ---------------------------------------------------------------------------
// Email check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn check_email_reports_existing_account() {
    let app = common::build_test_app().await;

    let response = post_json(app, "/api/v1/auth/check-email", json!({ "email": "john@example.com" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "exists": true }));
}

#[tokio::test]
async fn check_email_is_case_insensitive() {
    let app = common::build_test_app().await;

    let response = post_json(app, "/api/v1/auth/check-email", json!({ "email": " John@Example.com " })).await;

    assert_eq!(body_json(response).await["exists"], true);
}

#[tokio::test]
async fn check_email_does_not_register_unknown_address() {
    let (app, state) = common::build_test_app_with_state().await;

    for _ in 0..2 {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/check-email",
            json!({ "email": "newbie@example.com" }),
        )
        .await;
        assert_eq!(body_json(response).await["exists"], false);
    }
    assert_eq!(state.identities.len().await, 4);
}

#[tokio::test]
async fn check_email_rejects_malformed_address() {
    let app = common::build_test_app().await;

    let response = post_json(app, "/api/v1/auth/check-email", json!({ "email": "not-an-email" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login / signup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_seeded_credentials() {
    let app = common::build_test_app().await;

    let body = json!({ "email": "john@example.com", "password": "learn-john-1" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "success": true, "name": "John Doe" })
    );
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let app = common::build_test_app().await;

    let body = json!({ "email": "john@example.com", "password": "wrong-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid email or password");
}

#[tokio::test]
async fn login_with_unknown_email_returns_401() {
    let app = common::build_test_app().await;

    let body = json!({ "email": "ghost@example.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_then_login() {
    let app = common::build_test_app().await;

    let signup = json!({ "email": "jane@example.com", "name": "Jane Roe", "password": "secret-1" });
    let response = post_json(app.clone(), "/api/v1/auth/signup", signup).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let check = post_json(
        app.clone(),
        "/api/v1/auth/check-email",
        json!({ "email": "jane@example.com" }),
    )
    .await;
    assert_eq!(body_json(check).await["exists"], true);

    let login = json!({ "email": "jane@example.com", "password": "secret-1" });
    let response = post_json(app, "/api/v1/auth/login", login).await;
    assert_eq!(body_json(response).await["name"], "Jane Roe");
}

#[tokio::test]
async fn signup_with_existing_email_returns_409() {
    let app = common::build_test_app().await;

    let body = json!({ "email": "JOHN@example.com", "name": "Other John", "password": "secret-1" });
    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn signup_validates_input() {
    let app = common::build_test_app().await;

    for body in [
        json!({ "email": "a@b.co", "name": "A", "password": "12345" }),
        json!({ "email": "a@b.co", "name": "   ", "password": "123456" }),
        json!({ "email": "a@b", "name": "A", "password": "123456" }),
    ] {
        let response = post_json(app.clone(), "/api/v1/auth/signup", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// Run the code exchange for `email` so a reset is allowed.
async fn verify_email(app: axum::Router, state: &AppState, email: &str) {
    let code = state.codes.issue(email).await;
    let body = json!({ "email": email, "code": code });
    let response = post_json(app, "/api/v1/auth/verify-code", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reset_password_replaces_credentials() {
    let (app, state) = common::build_test_app_with_state().await;
    verify_email(app.clone(), &state, "sarah@example.com").await;

    let reset = json!({ "email": "sarah@example.com", "new_password": "fresh-pass" });
    let response = post_json(app.clone(), "/api/v1/auth/reset-password", reset).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let old = json!({ "email": "sarah@example.com", "password": "learn-sarah-1" });
    let response = post_json(app.clone(), "/api/v1/auth/login", old).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let new = json!({ "email": "sarah@example.com", "password": "fresh-pass" });
    let response = post_json(app, "/api/v1/auth/login", new).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reset_password_without_verified_code_returns_403() {
    let app = common::build_test_app().await;

    let reset = json!({ "email": "sarah@example.com", "new_password": "fresh-pass" });
    let response = post_json(app.clone(), "/api/v1/auth/reset-password", reset).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let old = json!({ "email": "sarah@example.com", "password": "learn-sarah-1" });
    let response = post_json(app, "/api/v1/auth/login", old).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn verified_code_allows_a_single_reset() {
    let (app, state) = common::build_test_app_with_state().await;
    verify_email(app.clone(), &state, "sarah@example.com").await;

    let reset = json!({ "email": "sarah@example.com", "new_password": "fresh-pass" });
    let response = post_json(app.clone(), "/api/v1/auth/reset-password", reset.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(app, "/api/v1/auth/reset-password", reset).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn reset_password_for_unknown_email_returns_404() {
    let (app, state) = common::build_test_app_with_state().await;
    verify_email(app.clone(), &state, "ghost@example.com").await;

    let reset = json!({ "email": "ghost@example.com", "new_password": "fresh-pass" });
    let response = post_json(app, "/api/v1/auth/reset-password", reset).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Email not found");
}

// ---------------------------------------------------------------------------
// Verification codes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_verification_code_acknowledges() {
    let (app, _state) = common::build_test_app_with_state().await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/send-verification-code",
        json!({ "email": "mike@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Verification code sent");

    // Issued codes are six digits, so this can never match.
    let response = post_json(
        app,
        "/api/v1/auth/verify-code",
        json!({ "email": "mike@example.com", "code": "000000" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid code");
}

#[tokio::test]
async fn verify_code_accepts_issued_code_once() {
    let (app, state) = common::build_test_app_with_state().await;
    let code = state.codes.issue("mike@example.com").await;

    let body = json!({ "email": "mike@example.com", "code": code });
    let response = post_json(app.clone(), "/api/v1/auth/verify-code", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Code verified");

    let response = post_json(app, "/api/v1/auth/verify-code", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verify_code_without_request_returns_400() {
    let app = common::build_test_app().await;

    let body = json!({ "email": "john@example.com", "code": "123456" });
    let response = post_json(app, "/api/v1/auth/verify-code", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
