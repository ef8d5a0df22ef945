//! Message, read-status, and unread-aggregation database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use ychat_core::traits::UnreadCount;
use ychat_core::{Message, ReadStatus, Snowflake};

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub room_id: i64,
    pub user_id: i64,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_deleted: bool,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            room_id: Snowflake::new(model.room_id),
            user_id: Snowflake::new(model.user_id),
            content: model.content,
            image_url: model.image_url,
            is_deleted: model.is_deleted,
            is_locked: model.is_locked,
            created_at: model.created_at,
        }
    }
}

/// Database model for the read_statuses table
#[derive(Debug, Clone, FromRow)]
pub struct ReadStatusModel {
    pub message_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ReadStatusModel> for ReadStatus {
    fn from(model: ReadStatusModel) -> Self {
        ReadStatus {
            message_id: Snowflake::new(model.message_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}

/// Row shape of the per-user unread-count aggregation
#[derive(Debug, Clone, FromRow)]
pub struct UnreadCountModel {
    pub room_id: i64,
    pub unread_count: i64,
}

impl From<UnreadCountModel> for UnreadCount {
    fn from(model: UnreadCountModel) -> Self {
        UnreadCount {
            room_id: Snowflake::new(model.room_id),
            unread_count: model.unread_count,
        }
    }
}
