//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET, SERVER_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Register a user, verify their email, and log in
async fn register_verified(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let register_req = RegisterRequest::unique();
    let response = server
        .post("/api/v1/auth/register", &register_req)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let code = server
        .verification_code_for(&register_req.email)
        .await
        .unwrap();
    let response = server
        .post(
            "/api/v1/auth/verify",
            &VerifyEmailRequest {
                email: register_req.email.clone(),
                code,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    (register_req, auth)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_starts_unverified() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(user.email, request.email);
    assert!(!user.verified);
}

#[tokio::test]
async fn test_register_rejects_foreign_domain() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.email = format!("outsider{}@gmail.com", unique_suffix());

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    // First registration
    server.post("/api/v1/auth/register", &request).await.unwrap();

    // Second registration with same email
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_refused_before_verification() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server
        .post("/api/v1/auth/register", &register_req)
        .await
        .unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_register_verify_login_flow() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, auth) = register_verified(&server).await;

    assert_eq!(auth.user.email, register_req.email);
    assert!(auth.user.verified);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_verify_rejects_wrong_code() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server
        .post("/api/v1/auth/register", &register_req)
        .await
        .unwrap();

    let response = server
        .post(
            "/api/v1/auth/verify",
            &VerifyEmailRequest {
                email: register_req.email.clone(),
                code: "000000".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@ufl.edu".to_string(),
        password: "WrongPass123".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_verified(&server).await;

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token,
            },
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!refreshed.access_token.is_empty());
}

// ============================================================================
// User Profile Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, auth) = register_verified(&server).await;

    let response = server
        .get_auth("/api/v1/users/@me", &auth.access_token)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.email, register_req.email);
}

#[tokio::test]
async fn test_get_current_user_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_verified(&server).await;

    let response = server
        .patch_auth(
            "/api/v1/users/@me",
            &auth.access_token,
            &UpdateUserRequest {
                display_name: None,
                year: Some(4),
                major: Some("Computer Science".to_string()),
            },
        )
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.year, Some(4));
    assert_eq!(user.major.as_deref(), Some("Computer Science"));
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_verified(&server).await;

    let request = CreatePostRequest::unique();
    let response = server
        .post_auth("/api/v1/posts", &auth.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(post.location, request.location);
    assert_eq!(post.group_status, "1/4");
    assert!(post.visible);

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &auth.access_token)
        .await
        .unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, post.id);
}

#[tokio::test]
async fn test_create_post_rejects_zero_capacity() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_verified(&server).await;

    let mut request = CreatePostRequest::unique();
    request.group_capacity = 0;

    let response = server
        .post_auth("/api/v1/posts", &auth.access_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_post_requires_author() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_verified(&server).await;
    let (_, other) = register_verified(&server).await;

    let response = server
        .post_auth(
            "/api/v1/posts",
            &author.access_token,
            &CreatePostRequest::unique(),
        )
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let update = UpdatePostRequest {
        location: Some("reitz union".to_string()),
        activity: None,
        group_capacity: None,
    };

    let response = server
        .patch_auth(
            &format!("/api/v1/posts/{}", post.id),
            &other.access_token,
            &update,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/posts/{}", post.id),
            &author.access_token,
            &update,
        )
        .await
        .unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.location, "reitz union");
}

#[tokio::test]
async fn test_delete_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_verified(&server).await;

    let response = server
        .post_auth(
            "/api/v1/posts",
            &auth.access_token,
            &CreatePostRequest::unique(),
        )
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_join_and_leave_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_verified(&server).await;
    let (_, joiner) = register_verified(&server).await;

    let mut request = CreatePostRequest::unique();
    request.group_capacity = 2;

    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Joining the last seat fills the group and hides the post
    let response = server
        .post_auth_empty(
            &format!("/api/v1/posts/{}/join", post.id),
            &joiner.access_token,
        )
        .await
        .unwrap();
    let joined: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(joined.group_status, "2/2");
    assert!(!joined.visible);

    // A second join must be rejected
    let response = server
        .post_auth_empty(
            &format!("/api/v1/posts/{}/join", post.id),
            &joiner.access_token,
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "GROUP_FULL");

    // Leaving reopens the seat
    let response = server
        .post_auth_empty(
            &format!("/api/v1/posts/{}/leave", post.id),
            &joiner.access_token,
        )
        .await
        .unwrap();
    let left: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(left.group_status, "1/2");
    assert!(left.visible);
}

#[tokio::test]
async fn test_my_posts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_verified(&server).await;

    let request = CreatePostRequest::unique();
    server
        .post_auth("/api/v1/posts", &auth.access_token, &request)
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/users/@me/posts", &auth.access_token)
        .await
        .unwrap();
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(posts.iter().any(|p| p.location == request.location));
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_search_ranks_matches_first() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_verified(&server).await;

    // Two posts with unique location/activity pairs
    let matching = CreatePostRequest::unique();
    let other = CreatePostRequest::unique();
    server
        .post_auth("/api/v1/posts", &auth.access_token, &matching)
        .await
        .unwrap();
    server
        .post_auth("/api/v1/posts", &auth.access_token, &other)
        .await
        .unwrap();

    let search = SearchRequest {
        locations: Some(vec![matching.location.clone()]),
        activity: Some(matching.activity.clone()),
        priority: "location".to_string(),
    };

    let response = server
        .post_auth("/api/v1/search", &auth.access_token, &search)
        .await
        .unwrap();
    let results: SearchResultsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Both posts are present; the full match ranks first
    assert!(results.total >= 2);
    assert_eq!(results.results[0].location, matching.location);
}

#[tokio::test]
async fn test_search_rejects_unknown_priority() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_verified(&server).await;

    let search = SearchRequest {
        locations: None,
        activity: None,
        priority: "vibes".to_string(),
    };

    let response = server
        .post_auth("/api/v1/search", &auth.access_token, &search)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(error.error.code, "INVALID_PRIORITY");
}
