//! Seed data loaded at start-up.

use std::path::Path;

use edulearn_core::assessment::Assessment;
use edulearn_core::catalog::Course;
use edulearn_core::content::Week;
use edulearn_core::dashboard::{Announcement, Deadline};
use edulearn_core::leaderboard::LeaderboardEntry;
use edulearn_core::profile::Profile;
use edulearn_core::types::EntityId;
use serde::Deserialize;

use crate::error::StoreError;

/// The demo data set compiled into the binary.
const BUNDLED_SEED: &str = include_str!("../data/seed.json");

/// A known identity with a development password. Hashed on load.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// The weeks of one course.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseContent {
    pub course_id: EntityId,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seed {
    /// Display name of the signed-in learner on the dashboard.
    pub learner: String,
    #[serde(default)]
    pub users: Vec<SeedUser>,
    pub courses: Vec<Course>,
    #[serde(default)]
    pub course_content: Vec<CourseContent>,
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    pub profile: Profile,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub deadlines: Vec<Deadline>,
}

impl Seed {
    pub fn bundled() -> Result<Self, StoreError> {
        Self::from_json(BUNDLED_SEED)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
