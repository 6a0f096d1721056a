//! User profile service

use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{CurrentUserResponse, UpdateUserRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User profile service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current user's profile
    #[instrument(skip(self))]
    pub async fn get_current(&self, user_id: Uuid) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Update profile fields; omitted fields are left unchanged
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if let Some(display_name) = request.display_name {
            user.set_display_name(display_name);
        }
        if let Some(year) = request.year {
            user.set_year(Some(year));
        }
        if let Some(major) = request.major {
            user.set_major(Some(major));
        }

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "Profile updated");

        Ok(CurrentUserResponse::from(&user))
    }
}
