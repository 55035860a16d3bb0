//! Handler for the `/dashboard` resource.

use axum::extract::State;
use axum::Json;
use edulearn_core::dashboard::{Announcement, DashboardSummary, Deadline};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub announcements: Vec<Announcement>,
    pub deadlines: Vec<Deadline>,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    Ok(Json(DataResponse {
        data: DashboardResponse {
            summary: state.catalog.dashboard(),
            announcements: state.catalog.announcements().to_vec(),
            deadlines: state.catalog.deadlines().to_vec(),
        },
    }))
}
