//! Post entity - represents a time-boxed study-session request

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Minimum participant count: the author alone.
pub const GROUP_FLOOR: i32 = 1;

/// Study-session post entity
///
/// Visibility is derived state, never set by clients: a post is visible
/// exactly when it has an open seat and has not yet expired. No timer owns
/// posts, so every read path must call [`Post::recompute_visibility`] with
/// the current time before trusting the flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub location: String,
    pub activity: String,
    pub created_at: DateTime<Utc>,
    pub expires_after: Duration,
    pub group_current: i32,
    pub group_capacity: i32,
    pub visible: bool,
    /// Storage-level flag; false once the owner deactivates the post.
    pub active: bool,
}

impl Post {
    /// Create a new Post with the author counted as the first participant
    ///
    /// # Errors
    /// Returns `InvalidInput` if `capacity < 1` or `duration_hours <= 0`.
    pub fn new(
        id: Uuid,
        author_id: Uuid,
        location: String,
        activity: String,
        capacity: i32,
        duration_hours: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if capacity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "group capacity must be at least 1, got {capacity}"
            )));
        }
        if duration_hours <= 0 {
            return Err(DomainError::InvalidInput(format!(
                "duration must be a positive number of hours, got {duration_hours}"
            )));
        }

        Ok(Self {
            id,
            author_id,
            location,
            activity,
            created_at: now,
            expires_after: Duration::hours(duration_hours),
            group_current: GROUP_FLOOR,
            group_capacity: capacity,
            visible: true,
            active: true,
        })
    }

    /// The instant this post expires
    #[inline]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + self.expires_after
    }

    /// Check whether the post has expired at `now`
    ///
    /// Monotonic: once true for a given time, it stays true for all later times.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= self.expires_after
    }

    /// Check whether a seat is still open
    #[inline]
    pub fn has_open_seat(&self) -> bool {
        self.group_current < self.group_capacity
    }

    /// Recompute the derived visibility flag from the invariant
    ///
    /// `visible == has_open_seat && !is_expired(now)`
    pub fn recompute_visibility(&mut self, now: DateTime<Utc>) {
        self.visible = self.has_open_seat() && !self.is_expired(now);
    }

    /// Add a participant
    ///
    /// The capacity check happens before the increment, so a post at capacity
    /// is left untouched.
    ///
    /// # Errors
    /// Returns `GroupFull` if the group is already at capacity.
    pub fn join(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.has_open_seat() {
            return Err(DomainError::GroupFull);
        }
        self.group_current += 1;
        self.recompute_visibility(now);
        Ok(())
    }

    /// Remove a participant
    ///
    /// # Errors
    /// Returns `LeaveBelowFloor` if only the author remains.
    pub fn leave(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.group_current <= GROUP_FLOOR {
            return Err(DomainError::LeaveBelowFloor);
        }
        self.group_current -= 1;
        self.recompute_visibility(now);
        Ok(())
    }

    /// Check if a user is the post author
    #[inline]
    pub fn is_author(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Hours left before expiration, clamped at zero
    pub fn hours_remaining(&self, now: DateTime<Utc>) -> f64 {
        let remaining = self.expires_at() - now;
        let seconds = remaining.num_seconds();
        if seconds <= 0 {
            0.0
        } else {
            seconds as f64 / 3600.0
        }
    }

    /// Group fill as "current/capacity", e.g. "2/4"
    pub fn group_status(&self) -> String {
        format!("{}/{}", self.group_current, self.group_capacity)
    }
}
