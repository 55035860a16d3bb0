//! Logical routes of the learner front end and deferred navigation requests.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::types::EntityId;

/// Delay between a successful submit and the follow-up navigation, so the
/// success notice is visible before the view changes.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    ForgotPassword,
    Dashboard,
    Courses,
    Course(EntityId),
    Assessments,
    Leaderboard,
    /// The test-taking interface. Referenced, but rendered elsewhere.
    Test(EntityId),
    Profile,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Courses => "/courses".to_string(),
            Self::Course(id) => format!("/courses/{id}"),
            Self::Assessments => "/assessments".to_string(),
            Self::Leaderboard => "/leaderboard".to_string(),
            Self::Test(id) => format!("/test/{id}"),
            Self::Profile => "/profile".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl Serialize for Route {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

/// A navigation the caller should perform once `delay` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub route: Route,
    #[serde(rename = "delay_ms", serialize_with = "serialize_millis")]
    pub delay: Duration,
}

impl Navigation {
    pub fn after_delay(route: Route) -> Self {
        Self {
            route,
            delay: NAVIGATION_DELAY,
        }
    }
}

fn serialize_millis<S: serde::Serializer>(
    delay: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(delay.as_millis() as u64)
}
