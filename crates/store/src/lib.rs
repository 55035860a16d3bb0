//! In-memory backing stores for the EduLearn API.
//!
//! Everything is seeded at start-up from a JSON document (bundled by default)
//! and lives for the lifetime of the process. Credentials are stored only as
//! Argon2id hashes.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod password;
pub mod profile;
pub mod seed;
pub mod verification;

pub use catalog::Catalog;
pub use error::StoreError;
pub use identity::IdentityStore;
pub use profile::ProfileStore;
pub use seed::Seed;
pub use verification::VerificationCodes;
