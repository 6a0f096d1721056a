//! # studbud-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, CreatePostRequest, CurrentUserResponse, HealthResponse, LoginRequest,
    PostResponse, ReadinessResponse, RefreshTokenRequest, RegisterRequest, ResendCodeRequest,
    SearchRequest, SearchResultsResponse, UpdatePostRequest, UpdateUserRequest, VerifyEmailRequest,
};
pub use services::{
    AuthService, LogMailer, PostService, SearchService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService, VerificationMailer,
};
