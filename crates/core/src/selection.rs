//! Selection and navigation state for the course content view.
//!
//! A [`ContentNavigator`] is created fresh each time the view mounts. It owns
//! the week search query, the set of expanded weeks, and the single active
//! [`Selection`]. Selecting a video replaces any selected test and vice versa;
//! a test selection is gated by the access window and a denied selection
//! leaves the state untouched.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::access::{check_access, AccessDenied, MissingWindowPolicy};
use crate::assessment::Assessment;
use crate::content::{filter_weeks, Video, Week};
use crate::types::{EntityId, Timestamp};

/// Week expanded when the view first opens.
pub const INITIALLY_OPEN_WEEK: EntityId = 1;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The content shown in the right-hand panel. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Video { video: Video, week_title: String },
    Test { test: Assessment },
}

/// Tabs of the test detail panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestTab {
    #[default]
    Overview,
    AttemptHistory,
}

// ---------------------------------------------------------------------------
// ContentNavigator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ContentNavigator {
    weeks: Vec<Week>,
    query: String,
    open_weeks: BTreeSet<EntityId>,
    selection: Selection,
    active_tab: TestTab,
    policy: MissingWindowPolicy,
}

impl ContentNavigator {
    pub fn new(weeks: Vec<Week>, policy: MissingWindowPolicy) -> Self {
        Self {
            weeks,
            query: String::new(),
            open_weeks: BTreeSet::from([INITIALLY_OPEN_WEEK]),
            selection: Selection::None,
            active_tab: TestTab::default(),
            policy,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The weeks to render for the current query.
    pub fn visible_weeks(&self) -> Vec<Week> {
        filter_weeks(&self.weeks, &self.query)
    }

    /// Expand a collapsed week or collapse an expanded one.
    pub fn toggle_week(&mut self, week_id: EntityId) {
        if !self.open_weeks.remove(&week_id) {
            self.open_weeks.insert(week_id);
        }
    }

    pub fn is_week_open(&self, week_id: EntityId) -> bool {
        self.open_weeks.contains(&week_id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_video(&self) -> Option<&Video> {
        match &self.selection {
            Selection::Video { video, .. } => Some(video),
            _ => None,
        }
    }

    pub fn selected_test(&self) -> Option<&Assessment> {
        match &self.selection {
            Selection::Test { test } => Some(test),
            _ => None,
        }
    }

    /// Show `video` from `week`, replacing whatever was selected.
    pub fn select_video(&mut self, video: &Video, week: &Week) {
        tracing::debug!(video_id = video.id, week_id = week.id, "Video selected");
        self.selection = Selection::Video {
            video: video.clone(),
            week_title: week.title.clone(),
        };
    }

    /// Show `test` if its access window is open at `now`.
    ///
    /// On denial the current selection is kept and the denial is returned for
    /// the caller to surface.
    pub fn select_test(&mut self, test: &Assessment, now: Timestamp) -> Result<(), AccessDenied> {
        if let Err(denied) = check_access(test, now, self.policy) {
            tracing::debug!(test_id = test.id, reason = ?denied.reason, "Test selection denied");
            return Err(denied);
        }
        tracing::debug!(test_id = test.id, "Test selected");
        self.selection = Selection::Test { test: test.clone() };
        Ok(())
    }

    /// Whether the "Take Test" action of the selected test is currently
    /// available. Re-evaluated on every call.
    pub fn can_take_selected_test(&self, now: Timestamp) -> bool {
        self.selected_test()
            .is_some_and(|test| check_access(test, now, self.policy).is_ok())
    }

    pub fn active_tab(&self) -> TestTab {
        self.active_tab
    }

    pub fn set_tab(&mut self, tab: TestTab) {
        self.active_tab = tab;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::access::DenialReason;
    use crate::content::tests::sample_weeks;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    fn navigator() -> ContentNavigator {
        ContentNavigator::new(sample_weeks(), MissingWindowPolicy::Unrestricted)
    }

    fn exclusive(nav: &ContentNavigator) -> bool {
        nav.selected_video().is_some() != nav.selected_test().is_some()
    }

    #[test]
    fn starts_with_no_selection_and_first_week_open() {
        let nav = navigator();
        assert_eq!(nav.selection(), &Selection::None);
        assert!(nav.is_week_open(1));
        assert!(!nav.is_week_open(2));
    }

    #[test]
    fn selecting_video_records_week_title() {
        let mut nav = navigator();
        let week = sample_weeks()[1].clone();
        nav.select_video(&week.videos[0], &week);

        assert_matches!(
            nav.selection(),
            Selection::Video { video, week_title }
                if video.id == 3 && week_title == "Week 2: Context API"
        );
        assert!(exclusive(&nav));
    }

    #[test]
    fn selecting_test_clears_video() {
        let mut nav = navigator();
        let week = sample_weeks()[0].clone();
        nav.select_video(&week.videos[0], &week);

        nav.select_test(&week.assessments[0], now()).unwrap();
        assert_eq!(nav.selected_test().map(|t| t.id), Some(1));
        assert!(nav.selected_video().is_none());
        assert!(exclusive(&nav));
    }

    #[test]
    fn selecting_video_clears_test() {
        let mut nav = navigator();
        let week = sample_weeks()[0].clone();
        nav.select_test(&week.assessments[0], now()).unwrap();

        nav.select_video(&week.videos[1], &week);
        assert!(nav.selected_test().is_none());
        assert_eq!(nav.selected_video().map(|v| v.id), Some(2));
        assert!(exclusive(&nav));
    }

    #[test]
    fn denied_test_leaves_state_unchanged() {
        let mut nav = navigator();
        let week = sample_weeks()[0].clone();
        nav.select_video(&week.videos[0], &week);
        let before = nav.selection().clone();

        let mut closed = week.assessments[0].clone();
        closed.start_date = Some("2024-01-01".into());
        closed.end_date = Some("2024-12-31".into());

        let denied = nav.select_test(&closed, now());
        assert_matches!(denied, Err(AccessDenied { reason: DenialReason::Closed, .. }));
        assert_eq!(nav.selection(), &before);
    }

    #[test]
    fn denied_test_from_no_selection_stays_none() {
        let mut nav = navigator();
        let mut future = sample_weeks()[2].assessments[0].clone();
        future.start_date = Some("2030-01-01".into());

        assert!(nav.select_test(&future, now()).is_err());
        assert_eq!(nav.selection(), &Selection::None);
    }

    #[test]
    fn legacy_policy_gates_unset_windows() {
        let mut nav = ContentNavigator::new(sample_weeks(), MissingWindowPolicy::LegacyCalendar2024);
        let test = sample_weeks()[0].assessments[0].clone();
        assert!(nav.select_test(&test, now()).is_err());

        let in_2024 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(nav.select_test(&test, in_2024).is_ok());
        assert!(nav.can_take_selected_test(in_2024));
        assert!(!nav.can_take_selected_test(now()));
    }

    #[test]
    fn toggle_week_flips_open_state() {
        let mut nav = navigator();
        nav.toggle_week(1);
        assert!(!nav.is_week_open(1));
        nav.toggle_week(3);
        nav.toggle_week(1);
        assert!(nav.is_week_open(1));
        assert!(nav.is_week_open(3));
    }

    #[test]
    fn query_drives_visible_weeks() {
        let mut nav = navigator();
        assert_eq!(nav.visible_weeks().len(), 3);
        nav.set_query("hooks");
        let visible = nav.visible_weeks();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn tab_switching() {
        let mut nav = navigator();
        assert_eq!(nav.active_tab(), TestTab::Overview);
        nav.set_tab(TestTab::AttemptHistory);
        assert_eq!(nav.active_tab(), TestTab::AttemptHistory);
    }
}
