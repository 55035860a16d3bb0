//! The signed-in learner's profile, editable through the API.

use edulearn_core::error::CoreError;
use edulearn_core::profile::{validate_personal_info, PersonalInfo, Profile};
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct ProfileStore {
    profile: RwLock<Profile>,
}

impl ProfileStore {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile: RwLock::new(profile),
        }
    }

    pub async fn get(&self) -> Profile {
        self.profile.read().await.clone()
    }

    /// Validate and replace the personal info section.
    pub async fn update_personal(&self, personal: PersonalInfo) -> Result<Profile, CoreError> {
        validate_personal_info(&personal)?;
        let mut profile = self.profile.write().await;
        profile.personal = personal;
        tracing::info!(email = %profile.email, "Profile personal info updated");
        Ok(profile.clone())
    }

    pub async fn set_notifications(&self, enabled: bool) -> Profile {
        let mut profile = self.profile.write().await;
        profile.notifications = enabled;
        profile.clone()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::seed::Seed;

    fn store() -> ProfileStore {
        ProfileStore::new(Seed::bundled().unwrap().profile)
    }

    #[tokio::test]
    async fn valid_update_is_applied() {
        let store = store();
        let mut personal = store.get().await.personal;
        personal.address = "Adyar, Chennai".into();

        let updated = store.update_personal(personal).await.unwrap();
        assert_eq!(updated.personal.address, "Adyar, Chennai");
        assert_eq!(store.get().await.personal.address, "Adyar, Chennai");
    }

    #[tokio::test]
    async fn invalid_update_is_rejected_and_not_applied() {
        let store = store();
        let mut personal = store.get().await.personal;
        personal.contact_number = String::new();

        assert_matches!(
            store.update_personal(personal).await,
            Err(CoreError::Validation(_))
        );
        assert_eq!(store.get().await.personal.contact_number, "+91 9344463530");
    }

    #[tokio::test]
    async fn notifications_toggle() {
        let store = store();
        assert!(!store.set_notifications(false).await.notifications);
        assert!(!store.get().await.notifications);
    }
}
