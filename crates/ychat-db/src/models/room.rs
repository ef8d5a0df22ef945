//! Room and participant database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use ychat_core::{Room, RoomParticipant, Snowflake};

/// Database model for the rooms table
#[derive(Debug, Clone, FromRow)]
pub struct RoomModel {
    pub id: i64,
    pub name: Option<String>,
    pub is_group: bool,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl From<RoomModel> for Room {
    fn from(model: RoomModel) -> Self {
        Room {
            id: Snowflake::new(model.id),
            name: model.name,
            is_group: model.is_group,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
        }
    }
}

/// Database model for the room_participants table
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantModel {
    pub room_id: i64,
    pub user_id: i64,
    pub joined_at: DateTime<Utc>,
}

impl From<ParticipantModel> for RoomParticipant {
    fn from(model: ParticipantModel) -> Self {
        RoomParticipant {
            room_id: Snowflake::new(model.room_id),
            user_id: Snowflake::new(model.user_id),
            joined_at: model.joined_at,
        }
    }
}
