//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
///
/// All domain errors are synchronous and non-retryable: an operation either
/// fully applies or has no effect.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unrecognized priority axis: {0}")]
    InvalidPriority(String),

    #[error("Verification code does not match")]
    VerificationCodeMismatch,

    #[error("Verification code has expired")]
    VerificationCodeExpired,

    // =========================================================================
    // State / Conflict Errors
    // =========================================================================
    #[error("Group is already at capacity")]
    GroupFull,

    #[error("Cannot leave: only the author remains")]
    LeaveBelowFloor,

    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the post author may do that")]
    NotPostAuthor,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidPriority(_) => "INVALID_PRIORITY",
            Self::VerificationCodeMismatch => "VERIFICATION_CODE_MISMATCH",
            Self::VerificationCodeExpired => "VERIFICATION_CODE_EXPIRED",
            Self::GroupFull => "GROUP_FULL",
            Self::LeaveBelowFloor => "LEAVE_BELOW_FLOOR",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_) | Self::UserNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidPriority(_)
                | Self::VerificationCodeMismatch
                | Self::VerificationCodeExpired
        )
    }

    /// Check if this is a state conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::GroupFull | Self::LeaveBelowFloor | Self::EmailAlreadyExists
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostAuthor)
    }
}
