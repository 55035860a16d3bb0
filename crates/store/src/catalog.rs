//! Read-only catalog: courses, course content, assessments, leaderboard and
//! dashboard feeds.

use std::collections::HashMap;

use edulearn_core::assessment::Assessment;
use edulearn_core::catalog::Course;
use edulearn_core::content::Week;
use edulearn_core::dashboard::{Announcement, DashboardSummary, Deadline};
use edulearn_core::error::CoreError;
use edulearn_core::leaderboard::{is_well_ranked, LeaderboardEntry};
use edulearn_core::types::EntityId;

use crate::seed::Seed;

#[derive(Debug, Clone)]
pub struct Catalog {
    learner: String,
    courses: Vec<Course>,
    content: HashMap<EntityId, Vec<Week>>,
    assessments: Vec<Assessment>,
    leaderboard: Vec<LeaderboardEntry>,
    announcements: Vec<Announcement>,
    deadlines: Vec<Deadline>,
}

impl Catalog {
    /// Build the catalog from seed data. Inconsistent rows are kept and
    /// logged.
    pub fn from_seed(seed: &Seed) -> Self {
        for course in seed.courses.iter().filter(|c| !c.is_status_consistent()) {
            tracing::warn!(
                course_id = course.id,
                status = course.status.as_str(),
                progress = course.progress,
                "Course status disagrees with progress",
            );
        }
        if !is_well_ranked(&seed.leaderboard) {
            tracing::warn!("Leaderboard ranks are not contiguous or scores are out of order");
        }

        let content = seed
            .course_content
            .iter()
            .map(|c| (c.course_id, c.weeks.clone()))
            .collect();

        tracing::info!(
            courses = seed.courses.len(),
            assessments = seed.assessments.len(),
            leaderboard = seed.leaderboard.len(),
            "Catalog loaded",
        );

        Self {
            learner: seed.learner.clone(),
            courses: seed.courses.clone(),
            content,
            assessments: seed.assessments.clone(),
            leaderboard: seed.leaderboard.clone(),
            announcements: seed.announcements.clone(),
            deadlines: seed.deadlines.clone(),
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: EntityId) -> Result<&Course, CoreError> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .ok_or(CoreError::NotFound { entity: "Course", id })
    }

    /// Weeks of a course. A course without published content has none.
    pub fn weeks(&self, course_id: EntityId) -> Result<&[Week], CoreError> {
        self.course(course_id)?;
        Ok(self
            .content
            .get(&course_id)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    pub fn assessment(&self, id: EntityId) -> Result<&Assessment, CoreError> {
        self.assessments
            .iter()
            .find(|a| a.id == id)
            .ok_or(CoreError::NotFound { entity: "Assessment", id })
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    pub fn deadlines(&self) -> &[Deadline] {
        &self.deadlines
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::compute(&self.learner, &self.courses, &self.assessments)
    }
}
