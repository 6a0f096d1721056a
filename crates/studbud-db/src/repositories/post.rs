//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use studbud_core::entities::{Post, GROUP_FLOOR};
use studbud_core::error::DomainError;
use studbud_core::traits::{PostRepository, RepoResult};

use crate::models::PostModel;

use super::error::{map_db_error, post_not_found};

const POST_COLUMNS: &str = "id, author_id, location, activity, created_at, expires_at, \
                            group_current, group_capacity, is_active";

/// PostgreSQL implementation of PostRepository
///
/// Seat changes go through single conditional UPDATE statements so that two
/// concurrent joins can never both take the last seat.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the raw row for an active post, used to disambiguate a failed
    /// conditional update from a missing post.
    async fn fetch_active_model(&self, id: Uuid) -> RepoResult<Option<PostModel>> {
        sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_active(&self, now: DateTime<Utc>) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE is_active = TRUE
              AND expires_at > $1
              AND group_current < group_capacity
            ORDER BY created_at DESC
            "
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Uuid) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE author_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            "
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, location, activity, created_at, expires_at,
                               group_current, group_capacity, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(&post.location)
        .bind(&post.activity)
        .bind(post.created_at)
        .bind(post.expires_at())
        .bind(post.group_current)
        .bind(post.group_capacity)
        .bind(post.active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET location = $2, activity = $3, group_capacity = $4
            WHERE id = $1 AND is_active = TRUE
            ",
        )
        .bind(post.id)
        .bind(&post.location)
        .bind(&post.activity)
        .bind(post.group_capacity)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn join(&self, id: Uuid, now: DateTime<Utc>) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            r"
            UPDATE posts
            SET group_current = group_current + 1
            WHERE id = $1
              AND is_active = TRUE
              AND expires_at > $2
              AND group_current < group_capacity
            RETURNING {POST_COLUMNS}
            "
        ))
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = result {
            return Ok(Post::from(model));
        }

        // The update matched nothing: missing, expired, or full
        match self.fetch_active_model(id).await? {
            None => Err(post_not_found(id)),
            Some(model) if model.is_expired(now) => Err(post_not_found(id)),
            Some(_) => Err(DomainError::GroupFull),
        }
    }

    #[instrument(skip(self))]
    async fn leave(&self, id: Uuid, _now: DateTime<Utc>) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            r"
            UPDATE posts
            SET group_current = group_current - 1
            WHERE id = $1
              AND is_active = TRUE
              AND group_current > $2
            RETURNING {POST_COLUMNS}
            "
        ))
        .bind(id)
        .bind(GROUP_FLOOR)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(Post::from(model)),
            None if self.fetch_active_model(id).await?.is_some() => {
                Err(DomainError::LeaveBelowFloor)
            }
            None => Err(post_not_found(id)),
        }
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET is_active = FALSE
            WHERE id = $1 AND is_active = TRUE
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM posts WHERE expires_at <= $1
            ",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
