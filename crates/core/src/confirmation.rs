//! The two-precondition gate in front of starting an assessment attempt.

use std::time::Duration;

use serde::Serialize;

use crate::assessment::Assessment;
use crate::navigation::{Navigation, Route};
use crate::notice::Notice;
use crate::types::EntityId;

/// How long the connectivity check takes before reporting success.
pub const CONNECTIVITY_CHECK_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    TermsAgreement,
    ConnectivityCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartedAttempt {
    pub assessment_id: EntityId,
    pub notice: Notice,
    pub navigation: Navigation,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GateError {
    #[error("Requirements not met: {0:?}")]
    Unmet(Vec<Precondition>),

    #[error("No attempts remaining for assessment {0}")]
    AttemptsExhausted(EntityId),
}

impl GateError {
    /// The notice shown for a rejected start.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Unmet(_) => Notice::destructive(
                "Requirements Not Met",
                "Please agree to terms and check your internet connection.",
            ),
            Self::AttemptsExhausted(_) => Notice::destructive(
                "No Attempts Remaining",
                "You have used every attempt for this assessment.",
            ),
        }
    }
}

/// Per-dialog state. Both flags start false and nothing resets the
/// connectivity flag once set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttemptGate {
    agreed_to_terms: bool,
    connectivity_verified: bool,
}

impl AttemptGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_agreed(&mut self, agreed: bool) {
        self.agreed_to_terms = agreed;
    }

    pub fn agreed_to_terms(&self) -> bool {
        self.agreed_to_terms
    }

    pub fn connectivity_verified(&self) -> bool {
        self.connectivity_verified
    }

    /// Simulated connectivity check. Always succeeds after `delay`.
    pub async fn check_connectivity(&mut self, delay: Duration) -> Notice {
        tokio::time::sleep(delay).await;
        self.connectivity_verified = true;
        tracing::debug!("Connectivity verified");
        Notice::info(
            "Connection Check",
            "Your internet connection is stable and ready for testing!",
        )
    }

    pub fn unmet(&self) -> Vec<Precondition> {
        let mut unmet = Vec::new();
        if !self.agreed_to_terms {
            unmet.push(Precondition::TermsAgreement);
        }
        if !self.connectivity_verified {
            unmet.push(Precondition::ConnectivityCheck);
        }
        unmet
    }

    pub fn can_start(&self) -> bool {
        self.agreed_to_terms && self.connectivity_verified
    }

    /// Start `assessment` if both preconditions hold and attempts remain.
    pub fn start(&self, assessment: &Assessment) -> Result<StartedAttempt, GateError> {
        let unmet = self.unmet();
        if !unmet.is_empty() {
            tracing::debug!(assessment_id = assessment.id, ?unmet, "Start rejected");
            return Err(GateError::Unmet(unmet));
        }
        if assessment.attempts_exhausted() {
            return Err(GateError::AttemptsExhausted(assessment.id));
        }

        tracing::info!(assessment_id = assessment.id, "Starting assessment");
        Ok(StartedAttempt {
            assessment_id: assessment.id,
            notice: Notice::info(
                "Starting Assessment",
                format!("Good luck with {}!", assessment.title),
            ),
            navigation: Navigation::after_delay(Route::Test(assessment.id)),
        })
    }
}
