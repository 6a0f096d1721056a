//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub year: Option<i32>,
    pub major: Option<String>,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("test{suffix}@ufl.edu"),
            password: "GoGators123".to_string(),
            display_name: format!("Test Student {suffix}"),
            year: Some(3),
            major: Some("Statistics".to_string()),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Email verification request
#[derive(Debug, Serialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub year: Option<i32>,
    pub major: Option<String>,
    pub verified: bool,
    pub created_at: String,
}

/// Profile update request
#[derive(Debug, Serialize)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub year: Option<i32>,
    pub major: Option<String>,
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub location: String,
    pub activity: String,
    pub group_capacity: i32,
    pub duration_hours: i64,
}

impl CreatePostRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            location: format!("library-{suffix}"),
            activity: format!("COURSE{suffix}"),
            group_capacity: 4,
            duration_hours: 2,
        }
    }
}

/// Post update request
#[derive(Debug, Serialize)]
pub struct UpdatePostRequest {
    pub location: Option<String>,
    pub activity: Option<String>,
    pub group_capacity: Option<i32>,
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub location: String,
    pub activity: String,
    pub group_status: String,
    pub group_current: i32,
    pub group_capacity: i32,
    pub hours_left: f64,
    pub visible: bool,
}

/// Search request
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub locations: Option<Vec<String>>,
    pub activity: Option<String>,
    pub priority: String,
}

/// Search results response
#[derive(Debug, Deserialize)]
pub struct SearchResultsResponse {
    pub results: Vec<PostResponse>,
    pub total: usize,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
