//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use ychat_cache::{RedisPool, RedisPoolConfig, Subscriber, SubscriberConfig};
use ychat_common::{AppConfig, AppError, JwtService};
use ychat_core::SnowflakeGenerator;
use ychat_db::{
    create_pool, PgBanRepository, PgMessageRepository, PgParticipantRepository,
    PgProfileRepository, PgReadStatusRepository, PgRoomRepository, PgSettingsRepository,
};
use ychat_service::ServiceContextBuilder;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    // Health endpoints bypass the rate limiter
    let router = router.merge(health_routes());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool; missing store credentials are fatal here
    info!("Connecting to PostgreSQL...");
    let db_config = ychat_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config)
        .map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool);
    info!("Redis connection established");

    // Change-notification subscriber feeding the realtime endpoints
    let subscriber = Subscriber::new(SubscriberConfig {
        redis_url: config.redis.url.clone(),
        ..Default::default()
    })
    .await
    .map_err(|e| AppError::Cache(e.to_string()))?;

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories
    let profile_repo = Arc::new(PgProfileRepository::new(pool.clone()));
    let room_repo = Arc::new(PgRoomRepository::new(pool.clone()));
    let participant_repo = Arc::new(PgParticipantRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));
    let read_status_repo = Arc::new(PgReadStatusRepository::new(pool.clone()));
    let ban_repo = Arc::new(PgBanRepository::new(pool.clone()));
    let settings_repo = Arc::new(PgSettingsRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(shared_redis)
        .profile_repo(profile_repo)
        .room_repo(room_repo)
        .participant_repo(participant_repo)
        .message_repo(message_repo)
        .read_status_repo(read_status_repo)
        .ban_repo(ban_repo)
        .settings_repo(settings_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .media_config(config.media.clone())
        .inference_config(config.inference.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, subscriber, config))
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
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
