//! Time-window gate for assessment access.
//!
//! An assessment may carry a `[start_date, end_date]` window of ISO calendar
//! dates. Dates are taken at midnight UTC and both ends are inclusive, so an
//! instant exactly equal to either bound is inside the window. The decision
//! is re-evaluated on every call; nothing is cached.
//!
//! What an unset bound means is an explicit [`MissingWindowPolicy`] instead of
//! a hard-coded calendar year.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::Assessment;
use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Window start assumed by [`MissingWindowPolicy::LegacyCalendar2024`].
pub const LEGACY_WINDOW_START: &str = "2024-01-01";

/// Window end assumed by [`MissingWindowPolicy::LegacyCalendar2024`].
pub const LEGACY_WINDOW_END: &str = "2024-12-31";

/// Placeholder echoed in denial messages for a bound that was never set.
pub const UNSET_BOUND_LABEL: &str = "(not set)";

/// Calendar date format accepted for window bounds.
pub const WINDOW_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// How an assessment without a configured bound is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingWindowPolicy {
    /// An unset bound imposes nothing on its side of the window.
    #[default]
    #[serde(rename = "unrestricted")]
    Unrestricted,
    /// Unset bounds are filled with [`LEGACY_WINDOW_START`] and
    /// [`LEGACY_WINDOW_END`].
    #[serde(rename = "legacy-2024")]
    LegacyCalendar2024,
}

impl MissingWindowPolicy {
    /// Parse the configuration form (`unrestricted`, `legacy-2024`).
    pub fn from_config(s: &str) -> Result<Self, CoreError> {
        match s {
            "unrestricted" => Ok(Self::Unrestricted),
            "legacy-2024" => Ok(Self::LegacyCalendar2024),
            _ => Err(CoreError::Validation(format!(
                "Invalid window policy '{s}'. Must be one of: unrestricted, legacy-2024"
            ))),
        }
    }

    fn fill<'a>(&self, configured: Option<&'a str>, legacy: &'static str) -> Option<&'a str> {
        match self {
            Self::Unrestricted => configured,
            Self::LegacyCalendar2024 => Some(configured.unwrap_or(legacy)),
        }
    }
}

// ---------------------------------------------------------------------------
// Denial
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    NotYetOpen,
    Closed,
    /// A configured bound could not be parsed as a date.
    InvalidWindow,
}

/// A rejected access attempt.
///
/// `start` and `end` are the literal configured strings, never a normalized
/// form, so a learner can spot a misconfigured window from the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Invalid Time – This test can only be accessed between {start} and {end}")]
pub struct AccessDenied {
    pub start: String,
    pub end: String,
    pub reason: DenialReason,
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Parse a window bound. Calendar dates resolve to midnight UTC; full RFC 3339
/// timestamps are accepted as-is.
pub fn parse_window_date(raw: &str) -> Option<Timestamp> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, WINDOW_DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Decide whether `test` may be opened at `now`.
pub fn check_access(
    test: &Assessment,
    now: Timestamp,
    policy: MissingWindowPolicy,
) -> Result<(), AccessDenied> {
    let start_raw = policy.fill(test.start_date.as_deref(), LEGACY_WINDOW_START);
    let end_raw = policy.fill(test.end_date.as_deref(), LEGACY_WINDOW_END);

    let deny = |reason| AccessDenied {
        start: start_raw.unwrap_or(UNSET_BOUND_LABEL).to_string(),
        end: end_raw.unwrap_or(UNSET_BOUND_LABEL).to_string(),
        reason,
    };

    let parse = |raw: Option<&str>| -> Result<Option<Timestamp>, AccessDenied> {
        raw.map(|raw| parse_window_date(raw).ok_or_else(|| deny(DenialReason::InvalidWindow)))
            .transpose()
    };
    let start = parse(start_raw)?;
    let end = parse(end_raw)?;

    if start.is_some_and(|start| now < start) {
        return Err(deny(DenialReason::NotYetOpen));
    }
    if end.is_some_and(|end| now > end) {
        return Err(deny(DenialReason::Closed));
    }
    Ok(())
}

/// Boolean form of [`check_access`].
pub fn is_accessible(test: &Assessment, now: Timestamp, policy: MissingWindowPolicy) -> bool {
    check_access(test, now, policy).is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
