//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for posts table
///
/// Expiry is stored as an absolute instant so queries can filter on it
/// directly; the entity's relative duration is reconstructed in the mapper.
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: Uuid,
    pub author_id: Uuid,
    pub location: String,
    pub activity: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub group_current: i32,
    pub group_capacity: i32,
    pub is_active: bool,
}

impl PostModel {
    /// Check if the post has expired at `now`
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
