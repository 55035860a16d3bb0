//! Request handlers, one submodule per resource.
//!
//! Handlers read from the stores in [`AppState`](crate::state::AppState) and
//! delegate every decision to `edulearn_core`; errors map via
//! [`AppError`](crate::error::AppError).

pub mod assessments;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod leaderboard;
pub mod profile;
