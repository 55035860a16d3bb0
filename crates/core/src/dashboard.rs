//! Learner dashboard: quick stats derived from the catalog, plus the
//! announcement and deadline feeds.

use serde::{Deserialize, Serialize};

use crate::assessment::{Assessment, AssessmentSummary};
use crate::catalog::Course;
use crate::types::{EntityId, ProgressStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementKind {
    Course,
    Result,
    Community,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    pub description: String,
    /// Relative display time ("2 hours ago").
    pub time: String,
    pub kind: AnnouncementKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub title: String,
    pub course: String,
    /// Relative display form ("Tomorrow", "3 days").
    pub due: String,
    pub priority: Priority,
}

/// The course the learner is currently working on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentCourse {
    pub id: EntityId,
    pub title: String,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub name: String,
    pub total_courses: usize,
    /// Assessments with at least one attempt.
    pub assessments_taken: usize,
    pub average_score: u32,
    pub current_course: Option<CurrentCourse>,
}

impl DashboardSummary {
    pub fn compute(name: &str, courses: &[Course], assessments: &[Assessment]) -> Self {
        // Highest progress wins; ties go to the earlier course.
        let current_course = courses
            .iter()
            .filter(|c| c.status == ProgressStatus::InProgress)
            .fold(None::<&Course>, |best, c| match best {
                Some(b) if b.progress >= c.progress => Some(b),
                _ => Some(c),
            })
            .map(|c| CurrentCourse {
                id: c.id,
                title: c.title.clone(),
                progress: c.progress,
            });

        Self {
            name: name.to_string(),
            total_courses: courses.len(),
            assessments_taken: assessments.iter().filter(|a| a.attempts > 0).count(),
            average_score: AssessmentSummary::compute(assessments).average_score,
            current_course,
        }
    }
}
