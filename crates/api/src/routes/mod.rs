pub mod assessments;
pub mod auth;
pub mod courses;
pub mod health;
pub mod profile;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/check-email                                 account exists? (POST)
/// /auth/login                                       login (POST)
/// /auth/signup                                      register (POST)
/// /auth/reset-password                              set a new password (POST)
/// /auth/send-verification-code                      issue a reset code (POST)
/// /auth/verify-code                                 check a reset code (POST)
///
/// /courses                                          list (?q, category, level, status)
/// /courses/{id}                                     get
/// /courses/{id}/weeks                               weeks pruned by ?q
/// /courses/{id}/assessments/{assessment_id}/access  window check (?at)
///
/// /assessments                                      list (?q, category, difficulty, status)
/// /assessments/summary                              counters
/// /assessments/{id}                                 get
/// /assessments/{id}/access                          window check (?at)
///
/// /leaderboard                                      podium + remaining (?q, course, department)
/// /dashboard                                        summary, announcements, deadlines
///
/// /profile                                          get, update personal info (PUT)
/// /profile/notifications                            update preference (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/courses", courses::router())
        .nest("/assessments", assessments::router())
        .route("/leaderboard", get(handlers::leaderboard::get_leaderboard))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .nest("/profile", profile::router())
}
