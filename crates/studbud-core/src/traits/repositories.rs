//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Group membership changes (`join`/`leave`)
//! are single atomic operations at this boundary so two concurrent joins
//! can never both take the last seat.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Post, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user's profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Store a pending verification code with its expiry
    async fn set_verification_code(
        &self,
        id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Mark a user as verified and clear any pending code
    async fn mark_verified(&self, id: Uuid) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID, regardless of visibility
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>>;

    /// List every active, unexpired post with an open seat, newest first
    async fn find_active(&self, now: DateTime<Utc>) -> RepoResult<Vec<Post>>;

    /// List posts authored by a user, newest first
    async fn find_by_author(&self, author_id: Uuid) -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update a post's editable fields (location, activity, capacity)
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Atomically claim a seat; returns the updated post
    ///
    /// # Errors
    /// `GroupFull` if no seat was open, `PostNotFound` if the post does not
    /// exist or is inactive.
    async fn join(&self, id: Uuid, now: DateTime<Utc>) -> RepoResult<Post>;

    /// Atomically release a seat; returns the updated post
    ///
    /// # Errors
    /// `LeaveBelowFloor` if only the author remains, `PostNotFound` if the
    /// post does not exist or is inactive.
    async fn leave(&self, id: Uuid, now: DateTime<Utc>) -> RepoResult<Post>;

    /// Deactivate a post (owner takedown)
    async fn deactivate(&self, id: Uuid) -> RepoResult<()>;

    /// Delete posts whose expiry has passed; returns the number removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}
