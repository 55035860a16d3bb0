//! Delivery of password-reset verification codes.
//!
//! With `SMTP_HOST` set, codes are emailed through `lettre`'s async SMTP
//! transport. Without it the code is written to the log, which is how local
//! development and the test suite receive it.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

const SUBJECT: &str = "Verification Code for Resetting Password in EduLearn";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "noreply@edulearn.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables. `None` when
    /// `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | yes      |                          |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_FROM`     | no       | `noreply@edulearn.local` |
    /// | `SMTP_USER`     | no       |                          |
    /// | `SMTP_PASSWORD` | no       |                          |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Mailer {
    Smtp(EmailConfig),
    /// Log the code instead of sending it.
    Log,
}

impl Mailer {
    pub fn from_env() -> Self {
        match EmailConfig::from_env() {
            Some(config) => {
                tracing::info!(host = %config.smtp_host, port = config.smtp_port, "SMTP mailer configured");
                Self::Smtp(config)
            }
            None => {
                tracing::warn!("SMTP_HOST not set, verification codes will be logged");
                Self::Log
            }
        }
    }

    pub async fn send_verification_code(
        &self,
        to_email: &str,
        name: &str,
        code: &str,
    ) -> Result<(), EmailError> {
        let config = match self {
            Self::Smtp(config) => config,
            Self::Log => {
                tracing::info!(to = to_email, code, "Verification code (mail delivery disabled)");
                return Ok(());
            }
        };

        let email = Message::builder()
            .from(config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(verification_body(name, code))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(to = to_email, "Verification code emailed");
        Ok(())
    }
}

fn verification_body(name: &str, code: &str) -> String {
    format!(
        "Dear {name},\n\n\
         We received a request to reset the password for your EduLearn account.\n\
         For your security, we require you to verify your identity by entering a code.\n\n\
         Your verification code is: {code}\n\n\
         If you didn't request this, please ignore this email.\n"
    )
}
