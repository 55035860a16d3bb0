//! Learner profile and the personal-info editor.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::notice::Notice;

/// Display and input format for the date of birth (`01-01-2004`).
pub const DATE_OF_BIRTH_FORMAT: &str = "%d-%m-%Y";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,18}[0-9]$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub date_of_birth: String,
    pub contact_number: String,
    pub address: String,
    pub emergency_contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicInfo {
    pub degree: String,
    pub university: String,
    pub cgpa: String,
    pub passing_year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub filename: String,
    pub upload_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub tag: String,
    pub branch: String,
    pub batch: String,
    pub department: String,
    pub personal: PersonalInfo,
    pub academic: AcademicInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<Resume>,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_notifications() -> bool {
    true
}

/// Check the editable personal fields. All problems are reported in one
/// message.
pub fn validate_personal_info(info: &PersonalInfo) -> Result<(), CoreError> {
    let mut problems = Vec::new();

    if info.date_of_birth.trim().is_empty() {
        problems.push("Date of birth is required".to_string());
    } else if NaiveDate::parse_from_str(info.date_of_birth.trim(), DATE_OF_BIRTH_FORMAT).is_err() {
        problems.push(format!(
            "Date of birth '{}' must be DD-MM-YYYY",
            info.date_of_birth
        ));
    }
    for (label, value) in [
        ("Contact number", &info.contact_number),
        ("Emergency contact", &info.emergency_contact),
    ] {
        if value.trim().is_empty() {
            problems.push(format!("{label} is required"));
        } else if !PHONE_RE.is_match(value.trim()) {
            problems.push(format!("{label} '{value}' is not a valid phone number"));
        }
    }
    if info.address.trim().is_empty() {
        problems.push("Address is required".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(problems.join("; ")))
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// View/edit toggle over the personal info section. While editing, changes
/// go to a draft that is discarded on cancel.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    profile: Profile,
    draft: Option<PersonalInfo>,
}

impl ProfileEditor {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            draft: None,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// The Edit / Cancel button.
    pub fn toggle_edit(&mut self) {
        self.draft = match self.draft {
            Some(_) => None,
            None => Some(self.profile.personal.clone()),
        };
    }

    /// The draft being edited, if editing.
    pub fn draft_mut(&mut self) -> Option<&mut PersonalInfo> {
        self.draft.as_mut()
    }

    /// Validate and apply the draft. On failure the editor stays in edit mode
    /// with the draft intact.
    pub fn save(&mut self) -> Result<Notice, CoreError> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(CoreError::Validation("Profile is not being edited".into()));
        };
        validate_personal_info(draft)?;

        if let Some(draft) = self.draft.take() {
            self.profile.personal = draft;
        }
        tracing::debug!(email = %self.profile.email, "Profile updated");
        Ok(Notice::info(
            "Profile Updated",
            "Your profile has been saved successfully.",
        ))
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        self.profile.notifications = enabled;
    }

    pub fn into_profile(self) -> Profile {
        self.profile
    }
}
