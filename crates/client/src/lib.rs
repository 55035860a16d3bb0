//! HTTP client for the EduLearn API.
//!
//! [`EduLearnApi`] wraps the `/api/v1` endpoints with [`reqwest`] and
//! implements [`IdentityService`], so the learner-side
//! [`IdentityFlow`](edulearn_core::identity::IdentityFlow) can run against a
//! remote server exactly as it does against the in-process store.

use std::collections::BTreeMap;

use edulearn_core::access::DenialReason;
use edulearn_core::assessment::Assessment;
use edulearn_core::catalog::Course;
use edulearn_core::content::Week;
use edulearn_core::error::CoreError;
use edulearn_core::filter::Facets;
use edulearn_core::identity::{normalize_email, Authenticated, IdentityService, NewIdentity};
use edulearn_core::types::{EntityId, Timestamp};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// The `error` field of the JSON body, or the raw body.
        message: String,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

impl From<ClientError> for CoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) => CoreError::Unavailable(e.to_string()),
            ClientError::Api { status, message } => match status {
                400 => CoreError::Validation(message),
                401 => CoreError::Unauthorized(message),
                403 => CoreError::Forbidden(message),
                404 => CoreError::Missing(message),
                409 => CoreError::Conflict(message),
                500..=599 => CoreError::Unavailable(format!("server error {status}: {message}")),
                _ => CoreError::Internal(format!("unexpected status {status}: {message}")),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct Exists {
    exists: bool,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    name: String,
}

/// A filtered listing plus facet dropdown options.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub facets: BTreeMap<String, Vec<String>>,
}

/// Result of an assessment window check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessCheck {
    pub assessment_id: EntityId,
    pub accessible: bool,
    #[serde(default)]
    pub reason: Option<DenialReason>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for one EduLearn server.
#[derive(Debug, Clone)]
pub struct EduLearnApi {
    client: reqwest::Client,
    base_url: String,
}

impl EduLearnApi {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    // ---- auth ----

    pub async fn check_email(&self, email: &str) -> Result<bool, ClientError> {
        let body: Exists = self.post("/auth/check-email", &json!({ "email": email })).await?;
        Ok(body.exists)
    }

    /// Returns the account's display name, or `None` on bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<String>, ClientError> {
        let body = json!({ "email": email, "password": password });
        match self.post::<LoginBody>("/auth/login", &body).await {
            Ok(login) => Ok(Some(login.name)),
            Err(ClientError::Api { status: 401, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn signup(&self, email: &str, name: &str, password: &str) -> Result<(), ClientError> {
        let body = json!({ "email": email, "name": name, "password": password });
        self.post::<serde_json::Value>("/auth/signup", &body).await?;
        Ok(())
    }

    /// `false` if no account has that email. The email must have passed
    /// [`verify_code`](Self::verify_code) first, otherwise the server answers
    /// 403.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<bool, ClientError> {
        let body = json!({ "email": email, "new_password": new_password });
        match self.post::<serde_json::Value>("/auth/reset-password", &body).await {
            Ok(_) => Ok(true),
            Err(ClientError::Api { status: 404, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn send_verification_code(&self, email: &str) -> Result<(), ClientError> {
        self.post::<serde_json::Value>("/auth/send-verification-code", &json!({ "email": email }))
            .await?;
        Ok(())
    }

    /// `false` if the code is wrong, expired, or was never issued.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<bool, ClientError> {
        let body = json!({ "email": email, "code": code });
        match self.post::<serde_json::Value>("/auth/verify-code", &body).await {
            Ok(_) => Ok(true),
            Err(ClientError::Api { status: 400, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ---- catalog ----

    pub async fn courses(&self, query: &str, facets: &Facets) -> Result<Listing<Course>, ClientError> {
        self.get_data("/courses", &search_params(query, facets)).await
    }

    pub async fn course(&self, id: EntityId) -> Result<Course, ClientError> {
        self.get_data(&format!("/courses/{id}"), &[]).await
    }

    pub async fn weeks(&self, course_id: EntityId, query: &str) -> Result<Vec<Week>, ClientError> {
        self.get_data(&format!("/courses/{course_id}/weeks"), &search_params(query, &Facets::new()))
            .await
    }

    pub async fn assessments(
        &self,
        query: &str,
        facets: &Facets,
    ) -> Result<Listing<Assessment>, ClientError> {
        self.get_data("/assessments", &search_params(query, facets)).await
    }

    /// Window check for a catalog assessment at `at` (server time if `None`).
    pub async fn assessment_access(
        &self,
        id: EntityId,
        at: Option<Timestamp>,
    ) -> Result<AccessCheck, ClientError> {
        let params: Vec<(String, String)> = at
            .map(|at| vec![("at".to_string(), at.to_rfc3339())])
            .unwrap_or_default();
        self.get_data(&format!("/assessments/{id}/access"), &params).await
    }

    // ---- private helpers ----

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ClientError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).query(params).send().await?;
        let envelope: Data<T> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Map a non-2xx response to [`ClientError::Api`], preferring the
    /// server's `error` message over the raw body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        tracing::debug!(status = status.as_u16(), %message, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

fn search_params(query: &str, facets: &Facets) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if !query.is_empty() {
        params.push(("q".to_string(), query.to_string()));
    }
    params.extend(
        facets
            .active()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    );
    params
}

// ---------------------------------------------------------------------------
// IdentityService
// ---------------------------------------------------------------------------

impl IdentityService for EduLearnApi {
    async fn lookup(&self, email: &str) -> Result<bool, CoreError> {
        Ok(self.check_email(email).await?)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Authenticated>, CoreError> {
        let name = self.login(email, password).await?;
        Ok(name.map(|full_name| Authenticated {
            email: normalize_email(email),
            full_name,
        }))
    }

    async fn register(&self, identity: &NewIdentity) -> Result<(), CoreError> {
        // 409 arrives as CoreError::Conflict, which the flow turns into a redirect.
        self.signup(&identity.email, &identity.full_name, &identity.password)
            .await?;
        Ok(())
    }
}
