//! # ychat-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! Provides PostgreSQL implementations for all repository traits defined in
//! `ychat-core`: connection pool management, `FromRow` models, and the
//! repositories themselves, including the aggregation queries the chat
//! client consumes as remote procedures (unread messages per room, unread
//! counts per user, personal-room resolution).

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgBanRepository, PgMessageRepository, PgParticipantRepository, PgProfileRepository,
    PgReadStatusRepository, PgRoomRepository, PgSettingsRepository,
};
