//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! IDs are serialized as UUID strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Current authenticated user response (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Study post response
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub location: String,
    pub activity: String,
    /// Group fill as "current/capacity", e.g. "2/4"
    pub group_status: String,
    pub group_current: i32,
    pub group_capacity: i32,
    pub time_posted: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Hours until expiry, clamped at zero
    pub hours_left: f64,
    pub visible: bool,
}

/// Ranked search results
#[derive(Debug, Serialize)]
pub struct SearchResultsResponse {
    pub results: Vec<PostResponse>,
    pub total: usize,
}

impl SearchResultsResponse {
    pub fn new(results: Vec<PostResponse>) -> Self {
        let total = results.len();
        Self { results, total }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response with dependency health
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: bool,
    pub timestamp: DateTime<Utc>,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "not_ready" }.to_string(),
            database,
            timestamp: Utc::now(),
        }
    }
}
