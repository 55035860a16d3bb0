//! Course content: weeks of videos and assessments, and the two-level search
//! over them.

use serde::{Deserialize, Serialize};

use crate::assessment::Assessment;
use crate::filter::{filter, matches_text, Facets, Filterable};
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: EntityId,
    pub title: String,
    /// Display string, e.g. `"15:30"`.
    pub duration: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u32>,
}

impl Filterable for Video {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }

    fn facet(&self, _name: &str) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub is_completed: bool,
}

impl Week {
    /// Number of videos marked complete ("2/3 videos").
    pub fn completed_videos(&self) -> usize {
        self.videos.iter().filter(|v| v.is_completed).count()
    }

    pub fn find_video(&self, id: EntityId) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    pub fn find_assessment(&self, id: EntityId) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.id == id)
    }
}

/// Filter weeks by `query` against week, video and assessment titles.
///
/// Every retained week carries only the children whose titles match. A week
/// is retained if its own title matches or at least one child survives, so a
/// week kept for its title alone may come back with no children.
pub fn filter_weeks(weeks: &[Week], query: &str) -> Vec<Week> {
    weeks
        .iter()
        .filter_map(|week| {
            let videos = filter(&week.videos, query, &Facets::new());
            // Assessments match on title only; their tags belong to the catalog search.
            let assessments: Vec<Assessment> = week
                .assessments
                .iter()
                .filter(|a| matches_text([a.title.as_str()], query))
                .cloned()
                .collect();

            let keep = matches_text([week.title.as_str()], query)
                || !videos.is_empty()
                || !assessments.is_empty();

            keep.then(|| Week {
                videos,
                assessments,
                ..week.clone()
            })
        })
        .collect()
}
