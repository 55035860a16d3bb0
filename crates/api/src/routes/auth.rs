//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /check-email             -> check_email
/// POST /login                   -> login
/// POST /signup                  -> signup
/// POST /reset-password          -> reset_password
/// POST /send-verification-code  -> send_verification_code
/// POST /verify-code             -> verify_code
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-email", post(auth::check_email))
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/reset-password", post(auth::reset_password))
        .route("/send-verification-code", post(auth::send_verification_code))
        .route("/verify-code", post(auth::verify_code))
}
