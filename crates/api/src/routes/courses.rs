//! Route definitions for the `/courses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET /                                         -> list_courses
/// GET /{id}                                     -> get_course
/// GET /{id}/weeks                               -> list_weeks
/// GET /{id}/assessments/{assessment_id}/access  -> check_content_access
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses))
        .route("/{id}", get(courses::get_course))
        .route("/{id}/weeks", get(courses::list_weeks))
        .route(
            "/{id}/assessments/{assessment_id}/access",
            get(courses::check_content_access),
        )
}
