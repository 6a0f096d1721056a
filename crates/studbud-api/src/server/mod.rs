//! Server setup and initialization
//!
//! Provides the main application builder, the expired-post sweeper, and the
//! server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use studbud_common::{AppConfig, AppError, JwtService};
use studbud_db::{create_pool, PgPostRepository, PgUserRepository};
use studbud_service::{LogMailer, PostService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the Axum application with the base middleware stack
///
/// Used by tests; `create_app_with_config` adds rate limiting and CORS.
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Build the Axum application with rate limiting and configured CORS
///
/// Health routes bypass the rate limiter so probes never get throttled.
pub fn create_app_with_config(state: AppState) -> Router {
    let config = state.config().clone();

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = studbud_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .post_repo(post_repo)
        .jwt_service(jwt_service)
        .mailer(Arc::new(LogMailer::new()))
        .verification(config.verification.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Spawn the background task that purges expired posts
///
/// Expired posts are already invisible at read time; the sweeper only
/// reclaims storage on the configured interval.
pub fn spawn_purge_sweeper(state: AppState) {
    let interval_secs = state.config().posts.purge_interval_secs;

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // First tick fires immediately; skip it so startup stays quick
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let service = PostService::new(state.service_context());
            if let Err(e) = service.purge_expired().await {
                warn!(error = %e, "Expired post purge failed");
            }
        }
    });

    info!(interval_secs, "Expired post sweeper started");
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid SERVER_HOST: {}", config.server.host)))?,
        config.server.port,
    );

    // Create app state
    let state = create_app_state(config).await?;

    // Start background housekeeping
    spawn_purge_sweeper(state.clone());

    // Build application
    let app = create_app_with_config(state);

    // Run server
    run_server(app, addr).await
}
