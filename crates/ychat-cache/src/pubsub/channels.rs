//! Pub/Sub channel definitions.
//!
//! Defines the channel naming conventions for Redis Pub/Sub. Each room has
//! one logical channel covering all mutation types; per-user channels carry
//! membership changes.

use ychat_core::Snowflake;

/// Channel prefix for room events
pub const ROOM_CHANNEL_PREFIX: &str = "room:";
/// Channel prefix for user-specific events
pub const USER_CHANNEL_PREFIX: &str = "user:";
/// Channel for broadcast events (all connected clients)
pub const BROADCAST_CHANNEL: &str = "broadcast";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Events for a specific room (all participants)
    Room(Snowflake),
    /// Events for a specific user (all their sessions)
    User(Snowflake),
    /// Broadcast to all connected clients
    Broadcast,
    /// Custom channel name
    Custom(String),
}

impl PubSubChannel {
    /// Create a room channel
    #[must_use]
    pub fn room(room_id: Snowflake) -> Self {
        Self::Room(room_id)
    }

    /// Create a user channel
    #[must_use]
    pub fn user(user_id: Snowflake) -> Self {
        Self::User(user_id)
    }

    /// Create a broadcast channel
    #[must_use]
    pub fn broadcast() -> Self {
        Self::Broadcast
    }

    /// Create a custom channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Room(id) => format!("{ROOM_CHANNEL_PREFIX}{id}"),
            Self::User(id) => format!("{USER_CHANNEL_PREFIX}{id}"),
            Self::Broadcast => BROADCAST_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `PubSubChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == BROADCAST_CHANNEL {
            return Self::Broadcast;
        }

        if let Some(id_str) = name.strip_prefix(ROOM_CHANNEL_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::Room(Snowflake::from(id));
            }
        }

        if let Some(id_str) = name.strip_prefix(USER_CHANNEL_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::User(Snowflake::from(id));
            }
        }

        Self::Custom(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(PubSubChannel::room(Snowflake::new(42)).name(), "room:42");
        assert_eq!(PubSubChannel::user(Snowflake::new(7)).name(), "user:7");
        assert_eq!(PubSubChannel::broadcast().name(), "broadcast");
        assert_eq!(PubSubChannel::custom("x").name(), "x");
    }

    #[test]
    fn test_parse_roundtrip() {
        for channel in [
            PubSubChannel::room(Snowflake::new(42)),
            PubSubChannel::user(Snowflake::new(7)),
            PubSubChannel::broadcast(),
            PubSubChannel::custom("weird"),
        ] {
            assert_eq!(PubSubChannel::parse(&channel.name()), channel);
        }
    }
}
