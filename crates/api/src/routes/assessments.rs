//! Route definitions for the `/assessments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::assessments;
use crate::state::AppState;

/// Routes mounted at `/assessments`.
///
/// ```text
/// GET /              -> list_assessments
/// GET /summary       -> summary
/// GET /{id}          -> get_assessment
/// GET /{id}/access   -> check_assessment_access
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assessments::list_assessments))
        .route("/summary", get(assessments::summary))
        .route("/{id}", get(assessments::get_assessment))
        .route("/{id}/access", get(assessments::check_assessment_access))
}
