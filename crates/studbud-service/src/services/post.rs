//! Post lifecycle service
//!
//! Creation, author-owned updates and deletion, seat claiming, and expiry
//! sweeps. Seat counts are mutated through the repository's conditional
//! updates so concurrent joins cannot overfill a group.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use studbud_common::AppError;
use studbud_core::entities::Post;
use studbud_core::error::DomainError;

use crate::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post lifecycle service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post with the author seated as the first participant
    ///
    /// Only verified accounts may post.
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Uuid,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        if !author.verified {
            return Err(AppError::EmailNotVerified.into());
        }

        let now = Utc::now();
        let post = Post::new(
            Uuid::new_v4(),
            author_id,
            request.location,
            request.activity,
            request.group_capacity,
            request.duration_hours,
            now,
        )?;

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(PostResponse::from_post(&post, now))
    }

    /// List all posts currently open for joining, newest first
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<Vec<PostResponse>> {
        let now = Utc::now();
        let posts = self.ctx.post_repo().find_active(now).await?;
        Ok(posts
            .iter()
            .map(|post| PostResponse::from_post(post, now))
            .collect())
    }

    /// Get a single post by id
    ///
    /// Expired and full posts are still returned here so authors can manage
    /// them; the `visible` flag tells the caller whether the post is joinable.
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Uuid) -> ServiceResult<PostResponse> {
        let now = Utc::now();
        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        post.recompute_visibility(now);
        Ok(PostResponse::from_post(&post, now))
    }

    /// List the posts authored by a user, newest first
    #[instrument(skip(self))]
    pub async fn my_posts(&self, author_id: Uuid) -> ServiceResult<Vec<PostResponse>> {
        let now = Utc::now();
        let mut posts = self.ctx.post_repo().find_by_author(author_id).await?;
        for post in &mut posts {
            post.recompute_visibility(now);
        }
        Ok(posts
            .iter()
            .map(|post| PostResponse::from_post(post, now))
            .collect())
    }

    /// Update a post's details; author only
    ///
    /// Capacity can shrink, but never below the seats already taken.
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let now = Utc::now();
        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if !post.is_author(user_id) {
            return Err(DomainError::NotPostAuthor.into());
        }

        if let Some(location) = request.location {
            post.location = location;
        }
        if let Some(activity) = request.activity {
            post.activity = activity;
        }
        if let Some(capacity) = request.group_capacity {
            if capacity < post.group_current {
                return Err(DomainError::InvalidInput(format!(
                    "group capacity {capacity} is below the {} seats already taken",
                    post.group_current
                ))
                .into());
            }
            post.group_capacity = capacity;
        }

        post.recompute_visibility(now);
        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post.id, "Post updated");

        Ok(PostResponse::from_post(&post, now))
    }

    /// Delete (deactivate) a post; author only
    #[instrument(skip(self))]
    pub async fn delete_post(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<()> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if !post.is_author(user_id) {
            return Err(DomainError::NotPostAuthor.into());
        }

        self.ctx.post_repo().deactivate(post_id).await?;

        info!(post_id = %post_id, "Post deleted");

        Ok(())
    }

    /// Claim a seat on a post
    ///
    /// The seat claim is atomic at the repository level; when two users race
    /// for the last seat exactly one succeeds and the other gets `GroupFull`.
    #[instrument(skip(self))]
    pub async fn join_post(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<PostResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if !user.verified {
            return Err(AppError::EmailNotVerified.into());
        }

        let now = Utc::now();
        let post = self.ctx.post_repo().join(post_id, now).await?;

        info!(post_id = %post_id, user_id = %user_id, group = %post.group_status(), "Seat claimed");

        Ok(PostResponse::from_post(&post, now))
    }

    /// Release a seat on a post
    ///
    /// The count never drops below the author's own seat.
    #[instrument(skip(self))]
    pub async fn leave_post(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<PostResponse> {
        let now = Utc::now();
        let post = self.ctx.post_repo().leave(post_id, now).await?;

        info!(post_id = %post_id, user_id = %user_id, group = %post.group_status(), "Seat released");

        Ok(PostResponse::from_post(&post, now))
    }

    /// Remove posts whose expiry has passed; returns how many were purged
    #[instrument(skip(self))]
    pub async fn purge_expired(&self) -> ServiceResult<u64> {
        let purged = self.ctx.post_repo().purge_expired(Utc::now()).await?;
        if purged > 0 {
            info!(purged, "Expired posts purged");
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{test_context, RecordingMailer};
    use chrono::Duration;
    use std::sync::Arc;
    use studbud_core::entities::User;

    async fn seed_user(ctx: &ServiceContext, email: &str, verified: bool) -> Uuid {
        let mut user = User::new(Uuid::new_v4(), email.to_string(), "Albert".to_string());
        user.verified = verified;
        ctx.user_repo().create(&user, "hash").await.unwrap();
        user.id
    }

    fn sample_request(capacity: i32) -> CreatePostRequest {
        CreatePostRequest {
            location: "marston".to_string(),
            activity: "STA3100".to_string(),
            group_capacity: capacity,
            duration_hours: 2,
        }
    }

    #[tokio::test]
    async fn test_create_post() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let response = service
            .create_post(author_id, sample_request(4))
            .await
            .unwrap();

        assert_eq!(response.group_status, "1/4");
        assert!(response.visible);
        assert!(response.hours_left > 1.9 && response.hours_left <= 2.0);
    }

    #[tokio::test]
    async fn test_unverified_author_cannot_post() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", false).await;

        let service = PostService::new(&ctx);
        let err = service
            .create_post(author_id, sample_request(4))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_join_and_leave_round_trip() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;
        let joiner_id = seed_user(&ctx, "gator2@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let post = service
            .create_post(author_id, sample_request(2))
            .await
            .unwrap();
        let post_id: Uuid = post.id.parse().unwrap();

        let joined = service.join_post(joiner_id, post_id).await.unwrap();
        assert_eq!(joined.group_status, "2/2");
        assert!(!joined.visible);

        let left = service.leave_post(joiner_id, post_id).await.unwrap();
        assert_eq!(left.group_status, "1/2");
        assert!(left.visible);
    }

    #[tokio::test]
    async fn test_join_full_post_rejected() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;
        let joiner_id = seed_user(&ctx, "gator2@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let post = service
            .create_post(author_id, sample_request(1))
            .await
            .unwrap();
        let post_id: Uuid = post.id.parse().unwrap();

        let err = service.join_post(joiner_id, post_id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::GroupFull)
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_joins_take_exactly_one_seat() {
        let ctx = Arc::new(test_context(Arc::new(RecordingMailer::default())));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;

        let post = PostService::new(&ctx)
            .create_post(author_id, sample_request(2))
            .await
            .unwrap();
        let post_id: Uuid = post.id.parse().unwrap();

        // Four verified users race for the single open seat
        let mut handles = Vec::new();
        for n in 0..4 {
            let joiner_id = seed_user(&ctx, &format!("racer{n}@ufl.edu"), true).await;
            let ctx = Arc::clone(&ctx);
            handles.push(tokio::spawn(async move {
                PostService::new(&ctx).join_post(joiner_id, post_id).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => assert!(matches!(
                    err,
                    ServiceError::Domain(DomainError::GroupFull)
                )),
            }
        }
        assert_eq!(successes, 1);

        let stored = ctx.post_repo().find_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(stored.group_current, 2);
    }

    #[tokio::test]
    async fn test_leave_never_drops_author_seat() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let post = service
            .create_post(author_id, sample_request(4))
            .await
            .unwrap();
        let post_id: Uuid = post.id.parse().unwrap();

        let err = service.leave_post(author_id, post_id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::LeaveBelowFloor)
        ));
    }

    #[tokio::test]
    async fn test_update_requires_author() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;
        let other_id = seed_user(&ctx, "gator2@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let post = service
            .create_post(author_id, sample_request(4))
            .await
            .unwrap();
        let post_id: Uuid = post.id.parse().unwrap();

        let request = UpdatePostRequest {
            location: Some("lib west".to_string()),
            activity: None,
            group_capacity: None,
        };
        let err = service
            .update_post(other_id, post_id, request.clone())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let updated = service.update_post(author_id, post_id, request).await.unwrap();
        assert_eq!(updated.location, "lib west");
    }

    #[tokio::test]
    async fn test_capacity_cannot_shrink_below_seated() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;
        let joiner_id = seed_user(&ctx, "gator2@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let post = service
            .create_post(author_id, sample_request(4))
            .await
            .unwrap();
        let post_id: Uuid = post.id.parse().unwrap();
        service.join_post(joiner_id, post_id).await.unwrap();

        let err = service
            .update_post(
                author_id,
                post_id,
                UpdatePostRequest {
                    location: None,
                    activity: None,
                    group_capacity: Some(1),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_delete_requires_author_and_hides_post() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;
        let other_id = seed_user(&ctx, "gator2@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let post = service
            .create_post(author_id, sample_request(4))
            .await
            .unwrap();
        let post_id: Uuid = post.id.parse().unwrap();

        let err = service.delete_post(other_id, post_id).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        service.delete_post(author_id, post_id).await.unwrap();
        let err = service.get_post(post_id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_list_active_hides_full_posts() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;
        let joiner_id = seed_user(&ctx, "gator2@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let open = service
            .create_post(author_id, sample_request(4))
            .await
            .unwrap();
        let full = service
            .create_post(author_id, sample_request(2))
            .await
            .unwrap();
        service
            .join_post(joiner_id, full.id.parse().unwrap())
            .await
            .unwrap();

        let active = service.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, open.id);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let ctx = test_context(Arc::new(RecordingMailer::default()));
        let author_id = seed_user(&ctx, "gator@ufl.edu", true).await;

        let service = PostService::new(&ctx);
        let post = service
            .create_post(author_id, sample_request(4))
            .await
            .unwrap();

        // Backdate the post past its expiry
        let post_id: Uuid = post.id.parse().unwrap();
        let mut stored = ctx.post_repo().find_by_id(post_id).await.unwrap().unwrap();
        stored.created_at = Utc::now() - Duration::hours(3);
        ctx.post_repo().create(&stored).await.unwrap();

        // Expired posts drop out of the active listing even before the sweep
        assert!(service.list_active().await.unwrap().is_empty());

        let purged = service.purge_expired().await.unwrap();
        assert_eq!(purged, 1);
        assert!(service.list_active().await.unwrap().is_empty());
    }
}
