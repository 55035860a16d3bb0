//! Query parameter types for the listing endpoints.
//!
//! Facet parameters accept `all` (or absence) to mean "no constraint". The
//! free-text `q` matches case-insensitively.

use chrono::{DateTime, Utc};
use edulearn_core::filter::Facets;
use serde::Deserialize;

/// `GET /courses?q=&category=&level=&status=`
#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
}

impl CourseQuery {
    pub fn facets(&self) -> Facets {
        use edulearn_core::catalog::facets::{CATEGORY, LEVEL, STATUS};

        let mut facets = Facets::new();
        facets.insert_opt(CATEGORY, self.category.as_deref());
        facets.insert_opt(LEVEL, self.level.as_deref());
        facets.insert_opt(STATUS, self.status.as_deref());
        facets
    }
}

/// `GET /assessments?q=&category=&difficulty=&status=`
#[derive(Debug, Default, Deserialize)]
pub struct AssessmentQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub status: Option<String>,
}

impl AssessmentQuery {
    pub fn facets(&self) -> Facets {
        use edulearn_core::assessment::facets::{CATEGORY, DIFFICULTY, STATUS};

        let mut facets = Facets::new();
        facets.insert_opt(CATEGORY, self.category.as_deref());
        facets.insert_opt(DIFFICULTY, self.difficulty.as_deref());
        facets.insert_opt(STATUS, self.status.as_deref());
        facets
    }
}

/// `GET /leaderboard?q=&course=&department=`
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub q: String,
    pub course: Option<String>,
    pub department: Option<String>,
}

impl LeaderboardQuery {
    pub fn facets(&self) -> Facets {
        use edulearn_core::leaderboard::facets::{COURSE, DEPARTMENT};

        let mut facets = Facets::new();
        facets.insert_opt(COURSE, self.course.as_deref());
        facets.insert_opt(DEPARTMENT, self.department.as_deref());
        facets
    }
}

/// `GET /courses/{id}/weeks?q=`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /assessments/{id}/access?at=` where `at` is RFC 3339. Defaults to now.
#[derive(Debug, Default, Deserialize)]
pub struct AccessQuery {
    pub at: Option<DateTime<Utc>>,
}

impl AccessQuery {
    pub fn instant(&self) -> DateTime<Utc> {
        self.at.unwrap_or_else(Utc::now)
    }
}
