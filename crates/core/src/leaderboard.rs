//! Leaderboard entries and the podium / remaining split.

use serde::{Deserialize, Serialize};

use crate::filter::{filter, Facets, Filterable};

/// Number of entries shown on the podium.
pub const PODIUM_SIZE: usize = 3;

/// Facet names understood by [`LeaderboardEntry`].
pub mod facets {
    pub const COURSE: &str = "course";
    pub const DEPARTMENT: &str = "department";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
    Merit,
    Participant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub score: u32,
    /// Percentage, 0-100.
    pub course_completion: u8,
    /// Percentage, 0-100.
    pub assessment_score: u8,
    pub badge: Badge,
    pub course: String,
    pub department: String,
}

impl Filterable for LeaderboardEntry {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn facet(&self, name: &str) -> Option<&str> {
        match name {
            facets::COURSE => Some(self.course.as_str()),
            facets::DEPARTMENT => Some(self.department.as_str()),
            _ => None,
        }
    }
}

/// Ranks start at 1 and are contiguous, with scores non-increasing.
///
/// The data is displayed as given either way; this is a diagnostic.
pub fn is_well_ranked(entries: &[LeaderboardEntry]) -> bool {
    let contiguous = entries
        .iter()
        .enumerate()
        .all(|(i, entry)| entry.rank as usize == i + 1);
    let ordered = entries.windows(2).all(|w| w[0].score >= w[1].score);
    contiguous && ordered
}

/// A filtered leaderboard split for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardView {
    pub podium: Vec<LeaderboardEntry>,
    pub remaining: Vec<LeaderboardEntry>,
}

impl LeaderboardView {
    /// Filter `entries` and put the first [`PODIUM_SIZE`] survivors on the
    /// podium. Ranks are the stored ones; they are not renumbered.
    pub fn build(entries: &[LeaderboardEntry], query: &str, facets: &Facets) -> Self {
        let mut podium = filter(entries, query, facets);
        let remaining = podium.split_off(podium.len().min(PODIUM_SIZE));
        Self { podium, remaining }
    }
}
