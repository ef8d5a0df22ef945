//! Room participant - membership edge granting room access
//!
//! A participant row is the sole authorization boundary for reading and
//! writing a room's messages. Removing the row is "leaving" the room.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Membership edge between a room and a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomParticipant {
    pub room_id: Snowflake,
    pub user_id: Snowflake,
    pub joined_at: DateTime<Utc>,
}

impl RoomParticipant {
    /// Create a new RoomParticipant
    pub fn new(room_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            room_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}
