//! User entity - represents a student account

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// User entity keyed by campus email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub year: Option<i32>,
    pub major: Option<String>,
    pub verified: bool,
    pub verification_code: Option<String>,
    pub code_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, unverified User
    pub fn new(id: Uuid, email: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            display_name,
            year: None,
            major: None,
            verified: false,
            verification_code: None,
            code_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a fresh verification code valid for `ttl`
    pub fn issue_verification_code(&mut self, code: String, ttl: Duration, now: DateTime<Utc>) {
        self.verification_code = Some(code);
        self.code_expires_at = Some(now + ttl);
        self.updated_at = now;
    }

    /// Consume a verification code
    ///
    /// # Errors
    /// Returns `VerificationCodeExpired` if the code's expiry has passed, or
    /// `VerificationCodeMismatch` if no code is pending or it does not match.
    pub fn verify(&mut self, code: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let pending = self
            .verification_code
            .as_deref()
            .ok_or(DomainError::VerificationCodeMismatch)?;

        if let Some(expires_at) = self.code_expires_at {
            if now >= expires_at {
                return Err(DomainError::VerificationCodeExpired);
            }
        }

        if pending != code {
            return Err(DomainError::VerificationCodeMismatch);
        }

        self.verified = true;
        self.verification_code = None;
        self.code_expires_at = None;
        self.updated_at = now;
        Ok(())
    }

    /// Check whether an unexpired verification code is pending
    pub fn has_pending_code(&self, now: DateTime<Utc>) -> bool {
        self.verification_code.is_some()
            && self.code_expires_at.is_some_and(|expires| now < expires)
    }

    /// Profile is complete once year and major are filled in
    pub fn is_profile_complete(&self) -> bool {
        !self.display_name.is_empty() && self.year.is_some() && self.major.is_some()
    }

    /// Update the display name
    pub fn set_display_name(&mut self, display_name: String) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    /// Update the academic year
    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
        self.updated_at = Utc::now();
    }

    /// Update the major
    pub fn set_major(&mut self, major: Option<String>) {
        self.major = major;
        self.updated_at = Utc::now();
    }
}
