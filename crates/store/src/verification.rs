//! One-time verification codes for password reset.
//!
//! Each email holds at most one active code. Issuing a new code replaces the
//! previous one. A successful verification consumes the code and leaves a
//! verified mark, which a password reset must consume within the same TTL.
//! Expired entries are swept whenever a code is issued.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use edulearn_core::identity::normalize_email;
use edulearn_core::types::Timestamp;
use rand::Rng;
use tokio::sync::RwLock;

/// Default lifetime of an issued code.
pub const DEFAULT_CODE_TTL: Duration = Duration::from_secs(600);

const CODE_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("No verification code was issued for this email")]
    NoCode,

    #[error("Invalid code")]
    Mismatch,

    #[error("Verification code expired")]
    Expired,
}

#[derive(Debug, Clone)]
struct PendingCode {
    code: String,
    expires_at: Timestamp,
}

#[derive(Debug, Default)]
struct Entries {
    pending: HashMap<String, PendingCode>,
    /// Emails that passed verification, keyed to when the mark lapses.
    verified: HashMap<String, Timestamp>,
}

impl Entries {
    fn prune(&mut self, now: Timestamp) {
        self.pending.retain(|_, p| p.expires_at >= now);
        self.verified.retain(|_, expires_at| *expires_at >= now);
    }
}

#[derive(Debug)]
pub struct VerificationCodes {
    ttl: chrono::Duration,
    entries: RwLock<Entries>,
}

impl VerificationCodes {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            entries: RwLock::new(Entries::default()),
        }
    }

    fn expiry(&self, now: Timestamp) -> Timestamp {
        now.checked_add_signed(self.ttl).unwrap_or(Timestamp::MAX_UTC)
    }

    /// Issue a fresh six-digit code for `email`.
    pub async fn issue(&self, email: &str) -> String {
        self.issue_at(email, Utc::now()).await
    }

    pub async fn issue_at(&self, email: &str, now: Timestamp) -> String {
        let key = normalize_email(email);
        let code = rand::rng().random_range(CODE_RANGE).to_string();
        let pending = PendingCode {
            code: code.clone(),
            expires_at: self.expiry(now),
        };

        let mut entries = self.entries.write().await;
        entries.prune(now);
        entries.verified.remove(&key);
        entries.pending.insert(key.clone(), pending);
        tracing::debug!(email = %key, active = entries.pending.len(), "Verification code issued");
        code
    }

    pub async fn verify(&self, email: &str, code: &str) -> Result<(), VerifyError> {
        self.verify_at(email, code, Utc::now()).await
    }

    /// Check `code` at `now`. An expired code is dropped; a wrong code is
    /// kept so the learner can retry.
    pub async fn verify_at(&self, email: &str, code: &str, now: Timestamp) -> Result<(), VerifyError> {
        let key = normalize_email(email);
        let mut entries = self.entries.write().await;
        let pending = entries.pending.get(&key).ok_or(VerifyError::NoCode)?;

        if now > pending.expires_at {
            entries.pending.remove(&key);
            return Err(VerifyError::Expired);
        }
        if pending.code != code.trim() {
            return Err(VerifyError::Mismatch);
        }
        entries.pending.remove(&key);
        entries.verified.insert(key, self.expiry(now));
        Ok(())
    }

    /// Take the verified mark for `email`. Returns `false` when the email was
    /// never verified or the mark has lapsed.
    pub async fn consume_verified(&self, email: &str) -> bool {
        self.consume_verified_at(email, Utc::now()).await
    }

    pub async fn consume_verified_at(&self, email: &str, now: Timestamp) -> bool {
        let key = normalize_email(email);
        match self.entries.write().await.verified.remove(&key) {
            Some(expires_at) => now <= expires_at,
            None => false,
        }
    }
}

impl Default for VerificationCodes {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_TTL)
    }
}
