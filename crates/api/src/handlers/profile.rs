//! Handlers for the `/profile` resource.

use axum::extract::State;
use axum::Json;
use edulearn_core::profile::{PersonalInfo, Profile};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /profile/notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationsRequest {
    pub enabled: bool,
}

/// GET /api/v1/profile
pub async fn get_profile(State(state): State<AppState>) -> AppResult<Json<DataResponse<Profile>>> {
    Ok(Json(DataResponse {
        data: state.profile.get().await,
    }))
}

/// PUT /api/v1/profile
///
/// Replace the editable personal info. Every invalid field is reported in
/// one 400 response and nothing is applied.
pub async fn update_profile(
    State(state): State<AppState>,
    Json(input): Json<PersonalInfo>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = state.profile.update_personal(input).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile/notifications
pub async fn update_notifications(
    State(state): State<AppState>,
    Json(input): Json<NotificationsRequest>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = state.profile.set_notifications(input.enabled).await;
    tracing::info!(enabled = input.enabled, "Notification preference updated");
    Ok(Json(DataResponse { data: profile }))
}
