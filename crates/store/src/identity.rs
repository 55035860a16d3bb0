//! In-memory identity store keyed by normalized email.

use std::collections::HashMap;

use chrono::Utc;
use edulearn_core::error::CoreError;
use edulearn_core::identity::{normalize_email, Authenticated, IdentityService, NewIdentity};
use edulearn_core::types::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::password::{hash_password, verify_password};
use crate::seed::SeedUser;

/// A registered identity. Never carries the plaintext password.
#[derive(Debug, Clone)]
pub struct StoredIdentity {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Default)]
pub struct IdentityStore {
    users: RwLock<HashMap<String, StoredIdentity>>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the seed users, skipping emails that already exist.
    pub async fn seed(&self, users: &[SeedUser]) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for user in users {
            let identity = NewIdentity {
                email: user.email.clone(),
                full_name: user.full_name.clone(),
                password: user.password.clone(),
            };
            if self.insert(&identity).await?.is_some() {
                inserted += 1;
            }
        }
        tracing::info!(count = inserted, "Seeded identities");
        Ok(inserted)
    }

    pub async fn find(&self, email: &str) -> Option<StoredIdentity> {
        self.users.read().await.get(&normalize_email(email)).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Replace the password of an existing identity. Returns `false` if no
    /// identity has that email.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<bool, StoreError> {
        let hash = hash_password(new_password)?;
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&normalize_email(email)) else {
            return Ok(false);
        };
        user.password_hash = hash;
        tracing::info!(user_id = %user.id, "Password reset");
        Ok(true)
    }

    /// Insert unless the email is taken. `None` means it was taken.
    async fn insert(&self, identity: &NewIdentity) -> Result<Option<Uuid>, StoreError> {
        let key = normalize_email(&identity.email);
        // Hash before taking the lock; it is the slow part.
        let password_hash = hash_password(&identity.password)?;

        let mut users = self.users.write().await;
        if users.contains_key(&key) {
            return Ok(None);
        }
        let id = Uuid::now_v7();
        users.insert(
            key.clone(),
            StoredIdentity {
                id,
                email: key,
                full_name: identity.full_name.clone(),
                password_hash,
                created_at: Utc::now(),
            },
        );
        Ok(Some(id))
    }
}

impl IdentityService for IdentityStore {
    async fn lookup(&self, email: &str) -> Result<bool, CoreError> {
        Ok(self.users.read().await.contains_key(&normalize_email(email)))
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Authenticated>, CoreError> {
        let Some(user) = self.find(email).await else {
            return Ok(None);
        };
        if !verify_password(password, &user.password_hash)? {
            return Ok(None);
        }
        Ok(Some(Authenticated {
            email: user.email,
            full_name: user.full_name,
        }))
    }

    async fn register(&self, identity: &NewIdentity) -> Result<(), CoreError> {
        match self.insert(identity).await? {
            Some(id) => {
                tracing::info!(user_id = %id, "Identity registered");
                Ok(())
            }
            None => Err(CoreError::Conflict(format!(
                "Email {} already registered",
                normalize_email(&identity.email)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use edulearn_core::identity::{FlowState, IdentityFlow, SubmitOutcome};

    use super::*;

    fn new_identity(email: &str) -> NewIdentity {
        NewIdentity {
            email: email.to_string(),
            full_name: "Jane Learner".to_string(),
            password: "abc123".to_string(),
        }
    }

    async fn seeded() -> IdentityStore {
        let store = IdentityStore::new();
        store
            .seed(&[SeedUser {
                email: "john@example.com".into(),
                full_name: "John Doe".into(),
                password: "learn-john-1".into(),
            }])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive_and_pure() {
        let store = seeded().await;
        assert!(store.lookup("JOHN@example.COM").await.unwrap());
        assert!(!store.lookup("new@example.com").await.unwrap());
        assert!(!store.lookup("new@example.com").await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn authenticate_checks_hash() {
        let store = seeded().await;
        let ok = store.authenticate("john@example.com", "learn-john-1").await.unwrap();
        assert_eq!(ok.unwrap().full_name, "John Doe");
        assert!(store.authenticate("john@example.com", "nope").await.unwrap().is_none());
        assert!(store.authenticate("ghost@example.com", "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stored_password_is_hashed() {
        let store = seeded().await;
        let user = store.find("john@example.com").await.unwrap();
        assert_ne!(user.password_hash, "learn-john-1");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn duplicate_register_conflicts() {
        let store = seeded().await;
        store.register(&new_identity("jane@example.com")).await.unwrap();
        let again = store.register(&new_identity("Jane@Example.com")).await;
        assert_matches!(again, Err(CoreError::Conflict(_)));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn reset_password_replaces_hash() {
        let store = seeded().await;
        assert!(store.reset_password("john@example.com", "fresh-pass").await.unwrap());
        assert!(store.authenticate("john@example.com", "fresh-pass").await.unwrap().is_some());
        assert!(store.authenticate("john@example.com", "learn-john-1").await.unwrap().is_none());
        assert!(!store.reset_password("ghost@example.com", "whatever").await.unwrap());
    }

    #[tokio::test]
    async fn seeding_twice_skips_existing() {
        let store = seeded().await;
        let again = store
            .seed(&[SeedUser {
                email: "john@example.com".into(),
                full_name: "Other".into(),
                password: "other-pass".into(),
            }])
            .await
            .unwrap();
        assert_eq!(again, 0);
    }

    #[tokio::test]
    async fn drives_identity_flow_end_to_end() {
        let store = Arc::new(seeded().await);
        let mut flow = IdentityFlow::new(Arc::clone(&store));

        flow.set_email("fresh@example.com");
        flow.submit_email().await.unwrap();
        assert_eq!(flow.state(), FlowState::SignupConfirmed);
        assert_eq!(store.len().await, 1);

        flow.set_full_name("Fresh Learner");
        flow.set_password("abc123");
        flow.set_confirm_password("abc123");
        let outcome = flow.submit_signup().await.unwrap();
        assert_matches!(outcome, SubmitOutcome::Success { .. });
        assert!(store.lookup("fresh@example.com").await.unwrap());
    }
}
