//! Course catalog entities.

use serde::{Deserialize, Serialize};

use crate::filter::Filterable;
use crate::types::{EntityId, ProgressStatus};

/// Facet names understood by [`Course`].
pub mod facets {
    pub const CATEGORY: &str = "category";
    pub const LEVEL: &str = "level";
    pub const STATUS: &str = "status";
}

/// A course as listed in the catalog, with optional detail-page fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: EntityId,
    pub title: String,
    pub instructor: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub duration: String,
    /// Percentage complete, 0-100.
    pub progress: u8,
    pub enrolled: u32,
    pub rating: f32,
    pub status: ProgressStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_lessons: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_lessons: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overview: Vec<String>,
}

impl Course {
    /// Whether `status` agrees with `progress` (`completed` at 100,
    /// `not-started` at 0). Not enforced; seed loading only warns.
    pub fn is_status_consistent(&self) -> bool {
        match self.status {
            ProgressStatus::Completed => self.progress == 100,
            ProgressStatus::NotStarted => self.progress == 0,
            ProgressStatus::InProgress => true,
        }
    }
}

impl Filterable for Course {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.instructor.as_str(), self.category.as_str()]
    }

    fn facet(&self, name: &str) -> Option<&str> {
        match name {
            facets::CATEGORY => Some(self.category.as_str()),
            facets::LEVEL => Some(self.level.as_str()),
            facets::STATUS => Some(self.status.as_str()),
            _ => None,
        }
    }
}
