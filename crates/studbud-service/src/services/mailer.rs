//! Verification mail delivery seam
//!
//! Services depend on this trait rather than a concrete mail provider, so
//! deployments can plug in a real sender while development and tests use the
//! tracing-backed default.

use async_trait::async_trait;
use thiserror::Error;

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Mail delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Sends verification codes to campus email addresses
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    async fn send_code(&self, email: &str, code: &str) -> Result<(), MailerError>;
}

/// Development mailer that writes the code to the log instead of sending mail
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VerificationMailer for LogMailer {
    async fn send_code(&self, email: &str, code: &str) -> Result<(), MailerError> {
        tracing::info!(email, code, "verification code issued");
        Ok(())
    }
}
