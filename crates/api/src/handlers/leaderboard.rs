//! Handler for the `/leaderboard` resource.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use edulearn_core::filter::facet_options;
use edulearn_core::leaderboard::{facets, LeaderboardView};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::LeaderboardQuery;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    #[serde(flatten)]
    pub view: LeaderboardView,
    pub facets: BTreeMap<&'static str, Vec<String>>,
}

/// GET /api/v1/leaderboard
///
/// Entries matching `q` (name) and the facets, split into podium and the rest.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardQuery>,
) -> AppResult<Json<DataResponse<LeaderboardResponse>>> {
    let entries = state.catalog.leaderboard();
    let view = LeaderboardView::build(entries, &params.q, &params.facets());

    let facets = BTreeMap::from([
        (facets::COURSE, facet_options(entries, facets::COURSE)),
        (facets::DEPARTMENT, facet_options(entries, facets::DEPARTMENT)),
    ]);

    Ok(Json(DataResponse {
        data: LeaderboardResponse { view, facets },
    }))
}
