//! User entity <-> model mapper

use studbud_core::entities::User;
use uuid::Uuid;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
            year: model.year,
            major: model.major,
            verified: model.verified,
            verification_code: model.verification_code,
            code_expires_at: model.code_expires_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert User entity reference to values for database insertion
pub struct UserInsert<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub year: Option<i32>,
    pub major: Option<&'a str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id,
            email: &user.email,
            display_name: &user.display_name,
            password_hash,
            year: user.year,
            major: user.major.as_deref(),
        }
    }
}

/// Convert User entity reference to values for database update
pub struct UserUpdate<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub year: Option<i32>,
    pub major: Option<&'a str>,
}

impl<'a> UserUpdate<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id,
            display_name: &user.display_name,
            year: user.year,
            major: user.major.as_deref(),
        }
    }
}
