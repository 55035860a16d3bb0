//! Assessments (tests and quizzes), their display defaults, and the summary
//! shown above the assessment list.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::filter::Filterable;
use crate::types::{EntityId, ProgressStatus};

// ---------------------------------------------------------------------------
// Display defaults
// ---------------------------------------------------------------------------

/// Duration shown when an assessment does not configure one.
pub const DEFAULT_DURATION: &str = "30 min";

/// Question count shown when an assessment does not configure one.
pub const DEFAULT_QUESTION_COUNT: u32 = 20;

/// Total marks shown when an assessment does not configure them.
pub const DEFAULT_TOTAL_MARKS: u32 = 100;

/// Facet names understood by [`Assessment`].
pub mod facets {
    pub const CATEGORY: &str = "category";
    pub const DIFFICULTY: &str = "difficulty";
    pub const STATUS: &str = "status";
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "Easy" => Ok(Self::Easy),
            "Medium" => Ok(Self::Medium),
            "Hard" => Ok(Self::Hard),
            _ => Err(CoreError::Validation(format!(
                "Invalid difficulty '{s}'. Must be one of: Easy, Medium, Hard"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// An assessment, either from the global assessment list or nested inside a
/// course week.
///
/// `start_date` / `end_date` are kept as the literal configured strings so an
/// access denial can echo them back unchanged; see [`crate::access`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<u32>,
    pub status: ProgressStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub negative_marking: bool,
    /// Day label within a course week ("Day 3").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_score: Option<u32>,
    /// Audit fields, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

fn default_max_attempts() -> u32 {
    1
}

impl Assessment {
    pub fn duration_or_default(&self) -> &str {
        self.duration.as_deref().unwrap_or(DEFAULT_DURATION)
    }

    pub fn questions_or_default(&self) -> u32 {
        self.questions.unwrap_or(DEFAULT_QUESTION_COUNT)
    }

    pub fn marks_or_default(&self) -> u32 {
        self.marks.unwrap_or(DEFAULT_TOTAL_MARKS)
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }

    /// A completed assessment with no attempts left cannot be retaken.
    pub fn attempts_exhausted(&self) -> bool {
        self.is_completed() && self.attempts >= self.max_attempts
    }

    /// Label of the primary action button.
    pub fn action_label(&self) -> &'static str {
        match self.status {
            ProgressStatus::NotStarted => "Start Assessment",
            ProgressStatus::InProgress => "Continue",
            ProgressStatus::Completed => "Retake",
        }
    }
}

impl Filterable for Assessment {
    fn text_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(1 + self.tags.len());
        fields.push(self.title.as_str());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn facet(&self, name: &str) -> Option<&str> {
        match name {
            facets::CATEGORY => Some(self.category.as_str()),
            facets::DIFFICULTY => Some(self.difficulty.as_str()),
            facets::STATUS => Some(self.status.as_str()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Counters shown above the assessment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssessmentSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Rounded mean of `last_score` over assessments that have one; 0 if none.
    pub average_score: u32,
}

impl AssessmentSummary {
    pub fn compute(assessments: &[Assessment]) -> Self {
        let count_status = |status: ProgressStatus| {
            assessments.iter().filter(|a| a.status == status).count()
        };
        let scores: Vec<u32> = assessments.iter().filter_map(|a| a.last_score).collect();
        let average_score = if scores.is_empty() {
            0
        } else {
            let sum: u32 = scores.iter().sum();
            (f64::from(sum) / scores.len() as f64).round() as u32
        };

        Self {
            total: assessments.len(),
            completed: count_status(ProgressStatus::Completed),
            in_progress: count_status(ProgressStatus::InProgress),
            average_score,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
