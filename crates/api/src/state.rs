use std::sync::Arc;
use std::time::Duration;

use edulearn_store::{Catalog, IdentityStore, ProfileStore, Seed, StoreError, VerificationCodes};

use crate::config::ServerConfig;
use crate::mailer::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Read-only catalog: courses, content, assessments, leaderboard, feeds.
    pub catalog: Arc<Catalog>,
    pub identities: Arc<IdentityStore>,
    pub profile: Arc<ProfileStore>,
    /// Pending password-reset codes.
    pub codes: Arc<VerificationCodes>,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    /// Build every store from `seed`. Seed users are hashed here, so this is
    /// the slow part of start-up.
    pub async fn from_seed(
        config: ServerConfig,
        seed: &Seed,
        mailer: Mailer,
    ) -> Result<Self, StoreError> {
        let identities = IdentityStore::new();
        let seeded = identities.seed(&seed.users).await?;
        tracing::info!(users = seeded, "Identity store seeded");

        let codes = VerificationCodes::new(Duration::from_secs(config.verification_code_ttl_secs));

        Ok(Self {
            catalog: Arc::new(Catalog::from_seed(seed)),
            identities: Arc::new(identities),
            profile: Arc::new(ProfileStore::new(seed.profile.clone())),
            codes: Arc::new(codes),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
        })
    }
}
