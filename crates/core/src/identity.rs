//! Login / signup identity resolution.
//!
//! [`IdentityFlow`] drives the two-step sign-in form: the learner first
//! submits an email, which is looked up through an [`IdentityService`]; a
//! known email continues to the password form, an unknown one to the signup
//! form. Lookup is a pure query. An identity is only created by a confirmed,
//! validated signup.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::navigation::{Navigation, Route};
use crate::notice::Notice;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Minimum accepted password length at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Check that `email` is present and shaped like `local@domain.tld`.
/// Surrounding whitespace is ignored, matching [`normalize_email`].
///
/// Returns the inline error message on failure.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Invalid email");
    }
    Ok(())
}

/// Canonical form used to compare emails. Matching is case-insensitive over
/// the whole address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Form fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Email,
    FullName,
    Password,
    ConfirmPassword,
}

/// Inline errors keyed by field. Every violated check is reported at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{field:?}: {message}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

// ---------------------------------------------------------------------------
// Collaborator
// ---------------------------------------------------------------------------

/// Data collected by a validated signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIdentity {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// A successfully verified login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authenticated {
    pub email: String,
    pub full_name: String,
}

/// The identity store the flow talks to: in-process or over HTTP.
pub trait IdentityService: Send + Sync {
    /// Whether an identity exists for `email`. Must not modify the store.
    fn lookup(&self, email: &str) -> impl Future<Output = Result<bool, CoreError>> + Send;

    /// Verify credentials. `Ok(None)` means unknown email or wrong password.
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<Authenticated>, CoreError>> + Send;

    /// Create an identity. Fails with [`CoreError::Conflict`] if the email is
    /// already registered.
    fn register(
        &self,
        identity: &NewIdentity,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl<T: IdentityService> IdentityService for Arc<T> {
    fn lookup(&self, email: &str) -> impl Future<Output = Result<bool, CoreError>> + Send {
        (**self).lookup(email)
    }

    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<Authenticated>, CoreError>> + Send {
        (**self).authenticate(email, password)
    }

    fn register(
        &self,
        identity: &NewIdentity,
    ) -> impl Future<Output = Result<(), CoreError>> + Send {
        (**self).register(identity)
    }
}

// ---------------------------------------------------------------------------
// Flow types
// ---------------------------------------------------------------------------

/// The tab selected above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Collecting the email address.
    EmailEntry,
    /// Email known; collecting the password.
    LoginConfirmed,
    /// Email unknown (or signup tab chosen); collecting signup details.
    SignupConfirmed,
}

/// Result of a submit that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Success {
        notice: Notice,
        navigation: Navigation,
    },
    /// The email was registered between lookup and signup. The flow is back
    /// on the login form with the email kept.
    DuplicateRedirect { notice: Notice },
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid input: {0}")]
    Invalid(FieldErrors),

    #[error("Action not available in state {0:?}")]
    WrongState(FlowState),

    /// The identity service failed. Flow state is unchanged.
    #[error(transparent)]
    Service(#[from] CoreError),
}

// ---------------------------------------------------------------------------
// IdentityFlow
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct IdentityFlow<S> {
    service: S,
    state: FlowState,
    email: String,
    full_name: String,
    password: String,
    confirm_password: String,
    errors: FieldErrors,
}

impl<S: IdentityService> IdentityFlow<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: FlowState::EmailEntry,
            email: String::new(),
            full_name: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            errors: FieldErrors::default(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The email is read-only once confirmed for login.
    pub fn email_editable(&self) -> bool {
        self.state != FlowState::LoginConfirmed
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    // ---- Field input ----

    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.email_editable() {
            self.email = email.into();
            self.errors.clear(Field::Email);
        }
    }

    pub fn set_full_name(&mut self, name: impl Into<String>) {
        self.full_name = name.into();
        self.errors.clear(Field::FullName);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.errors.clear(Field::Password);
    }

    pub fn set_confirm_password(&mut self, password: impl Into<String>) {
        self.confirm_password = password.into();
        self.errors.clear(Field::ConfirmPassword);
    }

    // ---- Transitions ----

    /// Validate the email and resolve it against the identity service.
    ///
    /// Returns a notice when the email is unknown and the flow moved on to
    /// signup.
    pub async fn submit_email(&mut self) -> Result<Option<Notice>, FlowError> {
        if self.state != FlowState::EmailEntry {
            return Err(FlowError::WrongState(self.state));
        }
        if let Err(message) = validate_email(&self.email) {
            self.errors.insert(Field::Email, message);
            return Err(FlowError::Invalid(self.errors.clone()));
        }

        let exists = self.service.lookup(&self.email).await?;
        self.errors = FieldErrors::default();
        if exists {
            tracing::debug!(email = %self.email, "Email recognised, continuing to login");
            self.state = FlowState::LoginConfirmed;
            Ok(None)
        } else {
            tracing::debug!(email = %self.email, "Email unknown, continuing to signup");
            self.state = FlowState::SignupConfirmed;
            Ok(Some(Notice::info(
                "Email not Present",
                "Enter details to become a new User.",
            )))
        }
    }

    /// Back to email entry with every field cleared.
    pub fn change_email(&mut self) {
        self.reset();
    }

    /// Explicit tab choice. Overrides whatever the lookup decided.
    pub fn select_mode(&mut self, mode: AuthMode) {
        self.errors = FieldErrors::default();
        self.state = match mode {
            AuthMode::Login => FlowState::EmailEntry,
            AuthMode::Signup => FlowState::SignupConfirmed,
        };
    }

    pub async fn submit_login(&mut self) -> Result<SubmitOutcome, FlowError> {
        if self.state != FlowState::LoginConfirmed {
            return Err(FlowError::WrongState(self.state));
        }
        if self.password.is_empty() {
            self.errors.insert(Field::Password, "Password is required");
            return Err(FlowError::Invalid(self.errors.clone()));
        }

        let Some(user) = self.service.authenticate(&self.email, &self.password).await? else {
            tracing::info!(email = %self.email, "Login rejected");
            self.errors
                .insert(Field::Password, "Invalid email or password");
            return Err(FlowError::Invalid(self.errors.clone()));
        };

        tracing::info!(email = %user.email, "Login successful");
        self.password.clear();
        self.errors = FieldErrors::default();
        Ok(SubmitOutcome::Success {
            notice: Notice::info("Login Successful", "Welcome back! Redirecting to dashboard..."),
            navigation: Navigation::after_delay(Route::Dashboard),
        })
    }

    pub async fn submit_signup(&mut self) -> Result<SubmitOutcome, FlowError> {
        if self.state != FlowState::SignupConfirmed {
            return Err(FlowError::WrongState(self.state));
        }
        if let Err(errors) = self.validate_signup() {
            self.errors = errors.clone();
            return Err(FlowError::Invalid(errors));
        }

        if self.service.lookup(&self.email).await? {
            return Ok(self.redirect_duplicate());
        }

        let identity = NewIdentity {
            email: self.email.clone(),
            full_name: self.full_name.trim().to_string(),
            password: self.password.clone(),
        };
        match self.service.register(&identity).await {
            Ok(()) => {}
            Err(CoreError::Conflict(_)) => return Ok(self.redirect_duplicate()),
            Err(err) => return Err(err.into()),
        }

        tracing::info!(email = %identity.email, "Account created");
        self.reset();
        Ok(SubmitOutcome::Success {
            notice: Notice::info("Account Created", "Welcome to EduLearn! Redirecting..."),
            navigation: Navigation::after_delay(Route::Dashboard),
        })
    }

    // ---- Helpers ----

    fn validate_signup(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        // The signup tab can skip email entry, so the email is checked here too.
        if let Err(message) = validate_email(&self.email) {
            errors.insert(Field::Email, message);
        }
        if self.full_name.trim().is_empty() {
            errors.insert(Field::FullName, "Full name is required");
        }
        if self.password.is_empty() {
            errors.insert(Field::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert(Field::Password, "Minimum 6 characters");
        }
        if self.confirm_password.is_empty() {
            errors.insert(Field::ConfirmPassword, "Confirm your password");
        } else if self.confirm_password != self.password {
            errors.insert(Field::ConfirmPassword, "Passwords do not match");
        }

        errors.into_result()
    }

    fn redirect_duplicate(&mut self) -> SubmitOutcome {
        tracing::info!(email = %self.email, "Signup for existing email, redirecting to login");
        self.full_name.clear();
        self.password.clear();
        self.confirm_password.clear();
        self.errors = FieldErrors::default();
        self.state = FlowState::LoginConfirmed;
        SubmitOutcome::DuplicateRedirect {
            notice: Notice::info(
                "Email already registred",
                "Please login in (or) use 'Forget Password' option",
            ),
        }
    }

    fn reset(&mut self) {
        self.state = FlowState::EmailEntry;
        self.email.clear();
        self.full_name.clear();
        self.password.clear();
        self.confirm_password.clear();
        self.errors = FieldErrors::default();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
