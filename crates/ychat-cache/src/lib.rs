//! # ychat-cache
//!
//! Redis layer for authentication sessions and change notifications.
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Refresh-token persistence with TTL
//! - **Pub/Sub**: The change-notification feed — every mutation publishes an
//!   event on its room's channel, and subscribers relay those events to
//!   connected clients

pub mod pool;
pub mod pubsub;
pub mod session;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};

// Re-export pubsub types
pub use pubsub::{
    PubSubChannel, PubSubEvent, Publisher, ReceivedMessage, Subscriber, SubscriberConfig,
    SubscriberError, SubscriberResult, BROADCAST_CHANNEL, ROOM_CHANNEL_PREFIX, USER_CHANNEL_PREFIX,
};
