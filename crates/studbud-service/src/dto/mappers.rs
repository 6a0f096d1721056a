//! Entity to DTO mappers
//!
//! Implements conversions from domain entities to response DTOs.

use chrono::{DateTime, Utc};
use studbud_core::entities::{Post, User};

use super::responses::{CurrentUserResponse, PostResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            year: user.year,
            major: user.major.clone(),
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl PostResponse {
    /// Build a response snapshot of a post as of `now`
    pub fn from_post(post: &Post, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            location: post.location.clone(),
            activity: post.activity.clone(),
            group_status: post.group_status(),
            group_current: post.group_current,
            group_capacity: post.group_capacity,
            time_posted: post.created_at,
            expires_at: post.expires_at(),
            hours_left: post.hours_remaining(now),
            visible: post.visible,
        }
    }
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self::from_post(post, Utc::now())
    }
}
