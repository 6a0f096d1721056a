//! Post entity <-> model mapper

use chrono::{DateTime, Utc};
use studbud_core::entities::Post;
use uuid::Uuid;

use crate::models::PostModel;

/// Convert PostModel to Post entity
///
/// The stored absolute expiry becomes the entity's relative duration, and the
/// derived visibility flag is recomputed against the current clock.
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        let mut post = Post {
            id: model.id,
            author_id: model.author_id,
            location: model.location,
            activity: model.activity,
            created_at: model.created_at,
            expires_after: model.expires_at - model.created_at,
            group_current: model.group_current,
            group_capacity: model.group_capacity,
            visible: false,
            active: model.is_active,
        };
        post.recompute_visibility(Utc::now());
        post
    }
}

/// Convert Post entity reference to values for database insertion
pub struct PostInsert<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub location: &'a str,
    pub activity: &'a str,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub group_current: i32,
    pub group_capacity: i32,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            location: &post.location,
            activity: &post.activity,
            created_at: post.created_at,
            expires_at: post.expires_at(),
            group_current: post.group_current,
            group_capacity: post.group_capacity,
        }
    }
}

/// Convert Post entity reference to values for database update
pub struct PostUpdate<'a> {
    pub id: Uuid,
    pub location: &'a str,
    pub activity: &'a str,
    pub group_capacity: i32,
}

impl<'a> PostUpdate<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id,
            location: &post.location,
            activity: &post.activity,
            group_capacity: post.group_capacity,
        }
    }
}
