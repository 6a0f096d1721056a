//! Authentication service
//!
//! Handles registration, campus email verification, login, and token refresh.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use studbud_common::auth::{
    generate_verification_code, hash_password, validate_password_strength, verify_password,
};
use studbud_common::AppError;
use studbud_core::entities::User;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    ResendCodeRequest, VerifyEmailRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const VERIFICATION_CODE_LENGTH: usize = 6;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and send a verification code to their campus email
    ///
    /// The account starts unverified; login is refused until the emailed code
    /// has been confirmed.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<CurrentUserResponse> {
        self.require_campus_email(&request.email)?;

        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Check if email already exists
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let mut user = User::new(Uuid::new_v4(), request.email, request.display_name);
        user.year = request.year;
        user.major = request.major;

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue_code(&user).await?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        if !user.verified {
            warn!(user_id = %user.id, "Login refused: email not verified");
            return Err(ServiceError::App(AppError::EmailNotVerified));
        }

        info!(user_id = %user.id, "User logged in successfully");

        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Refresh access token using a refresh token
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
            .map_err(ServiceError::from)?;

        let user_id = claims.user_id().map_err(ServiceError::from)?;

        // The account must still exist for the refresh to be honored
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Confirm an emailed verification code
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn verify_email(&self, request: VerifyEmailRequest) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", request.email.clone()))?;

        if user.verified {
            return Err(ServiceError::conflict("Email already verified"));
        }

        user.verify(&request.code, Utc::now())?;
        self.ctx.user_repo().mark_verified(user.id).await?;

        info!(user_id = %user.id, "Email verified");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Send a fresh verification code, replacing any pending one
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn resend_code(&self, request: ResendCodeRequest) -> ServiceResult<()> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", request.email.clone()))?;

        if user.verified {
            return Err(ServiceError::conflict("Email already verified"));
        }

        self.issue_code(&user).await
    }

    /// Validate an access token and return the user ID
    #[instrument(skip(self, token))]
    pub async fn validate_token(&self, token: &str) -> ServiceResult<Uuid> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(token)
            .map_err(ServiceError::from)?;

        claims.user_id().map_err(ServiceError::from)
    }

    /// Get user by access token
    #[instrument(skip(self, token))]
    pub async fn get_user_from_token(&self, token: &str) -> ServiceResult<User> {
        let user_id = self.validate_token(token).await?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Reject addresses outside the configured campus domain
    fn require_campus_email(&self, email: &str) -> ServiceResult<()> {
        let domain = &self.ctx.verification().email_domain;
        let suffix = format!("@{domain}");

        if email.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
            Ok(())
        } else {
            Err(ServiceError::validation(format!(
                "Registration requires an @{domain} email address"
            )))
        }
    }

    /// Generate, persist, and deliver a verification code
    async fn issue_code(&self, user: &User) -> ServiceResult<()> {
        let code = generate_verification_code(VERIFICATION_CODE_LENGTH);
        let expires_at = Utc::now() + Duration::minutes(self.ctx.verification().code_ttl_minutes);

        self.ctx
            .user_repo()
            .set_verification_code(user.id, &code, expires_at)
            .await?;

        self.ctx
            .mailer()
            .send_code(&user.email, &code)
            .await
            .map_err(|e| ServiceError::App(AppError::ExternalService(e.to_string())))?;

        Ok(())
    }
}
