//! Handlers for the `/auth` resource: email check, login, signup, and the
//! password-reset code exchange.
//!
//! These endpoints answer with bare JSON objects rather than the `data`
//! envelope.

use axum::extract::State;
use axum::Json;
use edulearn_core::error::CoreError;
use edulearn_core::identity::{validate_email, IdentityService, NewIdentity, MIN_PASSWORD_LENGTH};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Name used in the reset email when the address is not registered.
const FALLBACK_RECIPIENT_NAME: &str = "Learner";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/check-email` and `POST /auth/send-verification-code`.
#[derive(Debug, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn require_email(email: &str) -> Result<(), AppError> {
    validate_email(email).map_err(|msg| AppError::Core(CoreError::Validation(msg.into())))
}

fn require_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/check-email
///
/// Whether an account exists for the email. Never creates one.
pub async fn check_email(
    State(state): State<AppState>,
    Json(input): Json<EmailRequest>,
) -> AppResult<Json<CheckEmailResponse>> {
    require_email(&input.email)?;
    let exists = state.identities.lookup(&input.email).await?;

    tracing::debug!(exists, "Email checked");
    Ok(Json(CheckEmailResponse { exists }))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .identities
        .authenticate(&input.email, &input.password)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    tracing::info!(email = %user.email, "Login succeeded");
    Ok(Json(LoginResponse {
        success: true,
        name: user.full_name,
    }))
}

/// POST /api/v1/auth/signup
///
/// 409 if the email is already registered.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<Json<SuccessResponse>> {
    require_email(&input.email)?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Full name is required".into(),
        )));
    }
    require_password(&input.password)?;

    state
        .identities
        .register(&NewIdentity {
            email: input.email,
            full_name: input.name.trim().to_string(),
            password: input.password,
        })
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/v1/auth/reset-password
///
/// Requires a prior successful `verify-code` for the same email; the verified
/// mark is consumed here. 403 without one, 404 if the email is not
/// registered.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<SuccessResponse>> {
    require_password(&input.new_password)?;
    if !state.codes.consume_verified(&input.email).await {
        tracing::warn!("Password reset attempted without a verified code");
        return Err(AppError::Core(CoreError::Forbidden(
            "Email has not been verified".into(),
        )));
    }

    if !state
        .identities
        .reset_password(&input.email, &input.new_password)
        .await?
    {
        return Err(AppError::NotFound("Email not found".into()));
    }
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/v1/auth/send-verification-code
///
/// Issue a fresh six-digit code and mail it. A delivery failure is logged
/// and does not fail the request; the code stays valid either way.
pub async fn send_verification_code(
    State(state): State<AppState>,
    Json(input): Json<EmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    require_email(&input.email)?;

    let code = state.codes.issue(&input.email).await;
    let name = state
        .identities
        .find(&input.email)
        .await
        .map(|user| user.full_name)
        .unwrap_or_else(|| FALLBACK_RECIPIENT_NAME.to_string());

    if let Err(e) = state
        .mailer
        .send_verification_code(input.email.trim(), &name, &code)
        .await
    {
        tracing::warn!(error = %e, "Failed to deliver verification code");
    }

    Ok(Json(MessageResponse {
        message: "Verification code sent".into(),
    }))
}

/// POST /api/v1/auth/verify-code
///
/// 400 if no code is pending, the code is wrong, or it has expired.
pub async fn verify_code(
    State(state): State<AppState>,
    Json(input): Json<VerifyCodeRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .codes
        .verify(&input.email, &input.code)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(MessageResponse {
        message: "Code verified".into(),
    }))
}
