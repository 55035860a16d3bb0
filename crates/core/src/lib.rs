//! EduLearn domain types and learner-facing decision logic.
//!
//! Everything in this crate is free of I/O (the only async code is the
//! identity flow, which is generic over its collaborator, and the fixed-delay
//! connectivity check). The API server and the HTTP client both build on it.

pub mod access;
pub mod assessment;
pub mod catalog;
pub mod confirmation;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod identity;
pub mod leaderboard;
pub mod navigation;
pub mod notice;
pub mod profile;
pub mod selection;
pub mod types;
