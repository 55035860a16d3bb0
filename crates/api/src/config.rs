use std::path::PathBuf;

use edulearn_core::access::MissingWindowPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Treatment of assessments with no configured window (default: `unrestricted`).
    pub window_policy: MissingWindowPolicy,
    /// Lifetime of password-reset verification codes (default: `600`).
    pub verification_code_ttl_secs: u64,
    /// Seed document to load instead of the bundled one.
    pub seed_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`      | `30`                    |
    /// | `ASSESSMENT_WINDOW_POLICY`   | `unrestricted`          |
    /// | `VERIFICATION_CODE_TTL_SECS` | `600`                   |
    /// | `SEED_PATH`                  | bundled seed            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let window_policy = std::env::var("ASSESSMENT_WINDOW_POLICY")
            .map(|raw| {
                MissingWindowPolicy::from_config(raw.trim())
                    .unwrap_or_else(|e| panic!("ASSESSMENT_WINDOW_POLICY: {e}"))
            })
            .unwrap_or_default();

        let verification_code_ttl_secs: u64 = std::env::var("VERIFICATION_CODE_TTL_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("VERIFICATION_CODE_TTL_SECS must be a valid u64");

        let seed_path = std::env::var("SEED_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            window_policy,
            verification_code_ttl_secs,
            seed_path,
        }
    }
}
