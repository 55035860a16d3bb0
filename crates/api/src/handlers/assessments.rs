//! Handlers for the `/assessments` resource.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use edulearn_core::access::{check_access, AccessDenied, DenialReason};
use edulearn_core::assessment::{facets, Assessment, AssessmentSummary};
use edulearn_core::filter::{facet_options, filter};
use edulearn_core::types::EntityId;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{AccessQuery, AssessmentQuery};
use crate::response::{DataResponse, FilteredList};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Outcome of a window check. Denials carry the configured bounds verbatim.
#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub assessment_id: EntityId,
    pub accessible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenialReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl AccessResponse {
    pub fn new(assessment_id: EntityId, result: Result<(), AccessDenied>) -> Self {
        match result {
            Ok(()) => Self {
                assessment_id,
                accessible: true,
                reason: None,
                message: None,
                start: None,
                end: None,
            },
            Err(denied) => Self {
                assessment_id,
                accessible: false,
                reason: Some(denied.reason),
                message: Some(denied.to_string()),
                start: Some(denied.start),
                end: Some(denied.end),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/assessments
///
/// Assessments matching `q` (title or any tag) and every supplied facet.
pub async fn list_assessments(
    State(state): State<AppState>,
    Query(params): Query<AssessmentQuery>,
) -> AppResult<Json<DataResponse<FilteredList<Assessment>>>> {
    let assessments = state.catalog.assessments();
    let items = filter(assessments, &params.q, &params.facets());

    let facets = BTreeMap::from([
        (facets::CATEGORY, facet_options(assessments, facets::CATEGORY)),
        (facets::DIFFICULTY, facet_options(assessments, facets::DIFFICULTY)),
        (facets::STATUS, facet_options(assessments, facets::STATUS)),
    ]);

    Ok(Json(DataResponse {
        data: FilteredList { items, facets },
    }))
}

/// GET /api/v1/assessments/summary
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<DataResponse<AssessmentSummary>>> {
    Ok(Json(DataResponse {
        data: AssessmentSummary::compute(state.catalog.assessments()),
    }))
}

/// GET /api/v1/assessments/{id}
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(assessment_id): Path<EntityId>,
) -> AppResult<Json<DataResponse<Assessment>>> {
    let assessment = state.catalog.assessment(assessment_id)?.clone();
    Ok(Json(DataResponse { data: assessment }))
}

/// GET /api/v1/assessments/{id}/access
///
/// Whether the assessment may be opened at `at` (default: now) under the
/// configured missing-window policy.
pub async fn check_assessment_access(
    State(state): State<AppState>,
    Path(assessment_id): Path<EntityId>,
    Query(params): Query<AccessQuery>,
) -> AppResult<Json<DataResponse<AccessResponse>>> {
    let assessment = state.catalog.assessment(assessment_id)?;
    let result = check_access(assessment, params.instant(), state.config.window_policy);

    if let Err(denied) = &result {
        tracing::debug!(assessment_id, reason = ?denied.reason, "Assessment outside its window");
    }
    Ok(Json(DataResponse {
        data: AccessResponse::new(assessment_id, result),
    }))
}
