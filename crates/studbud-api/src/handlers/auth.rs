//! Authentication handlers
//!
//! Endpoints for registration, email verification, login, and token refresh.

use axum::{extract::State, Json};
use studbud_service::{
    AuthResponse, AuthService, CurrentUserResponse, LoginRequest, RefreshTokenRequest,
    RegisterRequest, ResendCodeRequest, VerifyEmailRequest,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
///
/// The account starts unverified; a verification code is sent to the
/// campus email address.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<CurrentUserResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Refresh access token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// Confirm an emailed verification code
///
/// POST /auth/verify
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyEmailRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.verify_email(request).await?;
    Ok(Json(response))
}

/// Resend a verification code
///
/// POST /auth/resend
pub async fn resend_code(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResendCodeRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.resend_code(request).await?;
    Ok(NoContent)
}
