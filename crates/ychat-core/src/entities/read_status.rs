//! Read status - per-(message, reader) marker recording that a reader has
//! seen a message. Created once, never updated or deleted; absence = unread.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Read receipt for a single (message, reader) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStatus {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl ReadStatus {
    /// Create a new ReadStatus
    pub fn new(message_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            message_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
