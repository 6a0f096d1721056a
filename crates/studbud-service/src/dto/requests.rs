//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`, and `Validate` where the input
//! needs shape checks beyond type structure.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: String,

    #[validate(range(min = 1, max = 8, message = "Year must be between 1 and 8"))]
    pub year: Option<i32>,

    #[validate(length(max = 100, message = "Major must be at most 100 characters"))]
    pub major: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Email verification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 4, max = 12, message = "Code must be 4-12 characters"))]
    pub code: String,
}

/// Resend verification code request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResendCodeRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Year must be between 1 and 8"))]
    pub year: Option<i32>,

    #[validate(length(max = 100, message = "Major must be at most 100 characters"))]
    pub major: Option<String>,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 100, message = "Location must be 1-100 characters"))]
    pub location: String,

    #[validate(length(min = 1, max = 100, message = "Activity must be 1-100 characters"))]
    pub activity: String,

    #[validate(range(min = 1, max = 64, message = "Group capacity must be between 1 and 64"))]
    pub group_capacity: i32,

    #[validate(range(min = 1, max = 168, message = "Duration must be between 1 and 168 hours"))]
    pub duration_hours: i64,
}

/// Update post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 100, message = "Location must be 1-100 characters"))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Activity must be 1-100 characters"))]
    pub activity: Option<String>,

    #[validate(range(min = 1, max = 64, message = "Group capacity must be between 1 and 64"))]
    pub group_capacity: Option<i32>,
}

// ============================================================================
// Search Requests
// ============================================================================

/// A field that accepts either a single string or a list of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// Flatten into a list of values, treating the literal "any"
    /// (case-insensitive) as a wildcard that empties the list.
    pub fn into_values(self) -> Vec<String> {
        let values = match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        };

        if values.iter().any(|v| v.eq_ignore_ascii_case("any")) {
            Vec::new()
        } else {
            values
        }
    }
}

/// Post search request
///
/// Omitted fields match everything; `priority` names which axis outranks
/// the other when only one of them matches.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub locations: Option<StringOrList>,

    #[serde(default)]
    pub activity: Option<String>,

    pub priority: String,
}
