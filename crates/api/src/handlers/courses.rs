//! Handlers for the `/courses` resource and its nested content.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use edulearn_core::access::check_access;
use edulearn_core::catalog::{facets, Course};
use edulearn_core::content::{filter_weeks, Week};
use edulearn_core::error::CoreError;
use edulearn_core::filter::{facet_options, filter};
use edulearn_core::types::EntityId;

use crate::error::{AppError, AppResult};
use crate::handlers::assessments::AccessResponse;
use crate::query::{AccessQuery, CourseQuery, SearchQuery};
use crate::response::{DataResponse, FilteredList};
use crate::state::AppState;

/// GET /api/v1/courses
///
/// Courses matching `q` (title, instructor, category) and every supplied facet.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQuery>,
) -> AppResult<Json<DataResponse<FilteredList<Course>>>> {
    let courses = state.catalog.courses();
    let items = filter(courses, &params.q, &params.facets());

    let facets = BTreeMap::from([
        (facets::CATEGORY, facet_options(courses, facets::CATEGORY)),
        (facets::LEVEL, facet_options(courses, facets::LEVEL)),
        (facets::STATUS, facet_options(courses, facets::STATUS)),
    ]);

    Ok(Json(DataResponse {
        data: FilteredList { items, facets },
    }))
}

/// GET /api/v1/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<EntityId>,
) -> AppResult<Json<DataResponse<Course>>> {
    let course = state.catalog.course(course_id)?.clone();
    Ok(Json(DataResponse { data: course }))
}

/// GET /api/v1/courses/{id}/weeks
///
/// The course's weeks, pruned to the videos and assessments matching `q`.
pub async fn list_weeks(
    State(state): State<AppState>,
    Path(course_id): Path<EntityId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<DataResponse<Vec<Week>>>> {
    let weeks = state.catalog.weeks(course_id)?;
    Ok(Json(DataResponse {
        data: filter_weeks(weeks, &params.q),
    }))
}

/// GET /api/v1/courses/{id}/assessments/{assessment_id}/access
///
/// Window check for an assessment nested in the course's content. Week
/// assessments have their own id space, separate from `/assessments`.
pub async fn check_content_access(
    State(state): State<AppState>,
    Path((course_id, assessment_id)): Path<(EntityId, EntityId)>,
    Query(params): Query<AccessQuery>,
) -> AppResult<Json<DataResponse<AccessResponse>>> {
    let assessment = state
        .catalog
        .weeks(course_id)?
        .iter()
        .find_map(|week| week.find_assessment(assessment_id))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Assessment",
            id: assessment_id,
        }))?;

    let result = check_access(assessment, params.instant(), state.config.window_policy);
    Ok(Json(DataResponse {
        data: AccessResponse::new(assessment.id, result),
    }))
}
