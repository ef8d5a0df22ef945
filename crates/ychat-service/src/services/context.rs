//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, outbound HTTP client, and other
//! dependencies needed by services.

use std::sync::Arc;

use ychat_cache::{Publisher, RefreshTokenStore, SharedRedisPool};
use ychat_common::auth::JwtService;
use ychat_common::{InferenceConfig, MediaConfig};
use ychat_core::traits::{
    BanRepository, MessageRepository, ParticipantRepository, ProfileRepository,
    ReadStatusRepository, RoomRepository, SettingsRepository,
};
use ychat_core::SnowflakeGenerator;
use ychat_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories (the injected read/write ports)
/// - The refresh-token session store
/// - The change-notification publisher
/// - JWT service, Snowflake generator
/// - Outbound HTTP client plus media/inference configuration
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    profile_repo: Arc<dyn ProfileRepository>,
    room_repo: Arc<dyn RoomRepository>,
    participant_repo: Arc<dyn ParticipantRepository>,
    message_repo: Arc<dyn MessageRepository>,
    read_status_repo: Arc<dyn ReadStatusRepository>,
    ban_repo: Arc<dyn BanRepository>,
    settings_repo: Arc<dyn SettingsRepository>,

    // Cache stores
    refresh_token_store: RefreshTokenStore,

    // Pub/Sub
    publisher: Publisher,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Outbound HTTP
    http_client: reqwest::Client,
    media_config: MediaConfig,
    inference_config: InferenceConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        profile_repo: Arc<dyn ProfileRepository>,
        room_repo: Arc<dyn RoomRepository>,
        participant_repo: Arc<dyn ParticipantRepository>,
        message_repo: Arc<dyn MessageRepository>,
        read_status_repo: Arc<dyn ReadStatusRepository>,
        ban_repo: Arc<dyn BanRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        media_config: MediaConfig,
        inference_config: InferenceConfig,
    ) -> Self {
        // Clone the inner RedisPool from the Arc
        let inner_pool = (*redis_pool).clone();
        let refresh_token_store = RefreshTokenStore::new(inner_pool.clone());
        let publisher = Publisher::new(inner_pool);

        Self {
            pool,
            redis_pool,
            profile_repo,
            room_repo,
            participant_repo,
            message_repo,
            read_status_repo,
            ban_repo,
            settings_repo,
            refresh_token_store,
            publisher,
            jwt_service,
            snowflake_generator,
            http_client: reqwest::Client::new(),
            media_config,
            inference_config,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the profile repository
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the room repository
    pub fn room_repo(&self) -> &dyn RoomRepository {
        self.room_repo.as_ref()
    }

    /// Get the participant repository
    pub fn participant_repo(&self) -> &dyn ParticipantRepository {
        self.participant_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the read-status repository
    pub fn read_status_repo(&self) -> &dyn ReadStatusRepository {
        self.read_status_repo.as_ref()
    }

    /// Get the ban repository
    pub fn ban_repo(&self) -> &dyn BanRepository {
        self.ban_repo.as_ref()
    }

    /// Get the settings repository
    pub fn settings_repo(&self) -> &dyn SettingsRepository {
        self.settings_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    // === Pub/Sub ===

    /// Get the change-notification publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> ychat_core::Snowflake {
        self.snowflake_generator.generate()
    }

    // === Outbound HTTP ===

    /// Get the shared outbound HTTP client
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Get the media CDN configuration
    pub fn media_config(&self) -> &MediaConfig {
        &self.media_config
    }

    /// Get the inference backend configuration
    pub fn inference_config(&self) -> &InferenceConfig {
        &self.inference_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    room_repo: Option<Arc<dyn RoomRepository>>,
    participant_repo: Option<Arc<dyn ParticipantRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    read_status_repo: Option<Arc<dyn ReadStatusRepository>>,
    ban_repo: Option<Arc<dyn BanRepository>>,
    settings_repo: Option<Arc<dyn SettingsRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    media_config: Option<MediaConfig>,
    inference_config: Option<InferenceConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn room_repo(mut self, repo: Arc<dyn RoomRepository>) -> Self {
        self.room_repo = Some(repo);
        self
    }

    pub fn participant_repo(mut self, repo: Arc<dyn ParticipantRepository>) -> Self {
        self.participant_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn read_status_repo(mut self, repo: Arc<dyn ReadStatusRepository>) -> Self {
        self.read_status_repo = Some(repo);
        self
    }

    pub fn ban_repo(mut self, repo: Arc<dyn BanRepository>) -> Self {
        self.ban_repo = Some(repo);
        self
    }

    pub fn settings_repo(mut self, repo: Arc<dyn SettingsRepository>) -> Self {
        self.settings_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn media_config(mut self, config: MediaConfig) -> Self {
        self.media_config = Some(config);
        self
    }

    pub fn inference_config(mut self, config: InferenceConfig) -> Self {
        self.inference_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool.ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.profile_repo.ok_or_else(|| ServiceError::validation("profile_repo is required"))?,
            self.room_repo.ok_or_else(|| ServiceError::validation("room_repo is required"))?,
            self.participant_repo.ok_or_else(|| ServiceError::validation("participant_repo is required"))?,
            self.message_repo.ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.read_status_repo.ok_or_else(|| ServiceError::validation("read_status_repo is required"))?,
            self.ban_repo.ok_or_else(|| ServiceError::validation("ban_repo is required"))?,
            self.settings_repo.ok_or_else(|| ServiceError::validation("settings_repo is required"))?,
            self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator.ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.media_config.ok_or_else(|| ServiceError::validation("media_config is required"))?,
            self.inference_config.ok_or_else(|| ServiceError::validation("inference_config is required"))?,
        ))
    }
}
