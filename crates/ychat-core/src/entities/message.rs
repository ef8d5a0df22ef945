//! Message entity - a text or image post inside a room

use chrono::{DateTime, Utc};

use crate::entities::ReadStatus;
use crate::value_objects::Snowflake;

/// Message entity
///
/// Exactly one of `content` / `image_url` is populated unless the message
/// has been soft-deleted, in which case both are cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub room_id: Snowflake,
    pub user_id: Snowflake,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_deleted: bool,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new text message
    pub fn new_text(id: Snowflake, room_id: Snowflake, user_id: Snowflake, content: String) -> Self {
        Self {
            id,
            room_id,
            user_id,
            content: Some(content),
            image_url: None,
            is_deleted: false,
            is_locked: false,
            created_at: Utc::now(),
        }
    }

    /// Create a new image message
    pub fn new_image(id: Snowflake, room_id: Snowflake, user_id: Snowflake, image_url: String) -> Self {
        Self {
            id,
            room_id,
            user_id,
            content: None,
            image_url: Some(image_url),
            is_deleted: false,
            is_locked: false,
            created_at: Utc::now(),
        }
    }

    /// Soft-delete: clear the payload and mark the row deleted.
    ///
    /// Idempotent in effect; the row itself persists.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.content = None;
        self.image_url = None;
    }

    /// Replace the text content (moderation edit)
    pub fn edit(&mut self, content: String) {
        self.content = Some(content);
    }

    /// Lock or unlock the message against moderation deletes
    pub fn set_locked(&mut self, locked: bool) {
        self.is_locked = locked;
    }

    /// Reassign the message to a different author
    pub fn reassign(&mut self, user_id: Snowflake) {
        self.user_id = user_id;
    }

    /// Check if the message carries an image payload
    #[inline]
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }

    /// Unread rule: a message is unread for `reader` iff no read-status row
    /// exists for (message, reader) and the reader is not the author.
    pub fn is_unread_by(&self, reader: Snowflake, statuses: &[ReadStatus]) -> bool {
        if self.user_id == reader {
            return false;
        }
        !statuses
            .iter()
            .any(|s| s.message_id == self.id && s.user_id == reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_message(id: i64, author: i64) -> Message {
        Message::new_text(
            Snowflake::new(id),
            Snowflake::new(100),
            Snowflake::new(author),
            "hello".to_string(),
        )
    }

    #[test]
    fn test_text_message_has_no_image() {
        let msg = text_message(1, 200);
        assert_eq!(msg.content.as_deref(), Some("hello"));
        assert!(!msg.has_image());
        assert!(!msg.is_deleted);
        assert!(!msg.is_locked);
    }

    #[test]
    fn test_soft_delete_clears_payload() {
        let mut msg = Message::new_image(
            Snowflake::new(1),
            Snowflake::new(100),
            Snowflake::new(200),
            "https://example.com/a.png".to_string(),
        );
        msg.soft_delete();
        assert!(msg.is_deleted);
        assert!(msg.content.is_none());
        assert!(msg.image_url.is_none());
    }

    #[test]
    fn test_soft_delete_is_idempotent() {
        let mut msg = text_message(1, 200);
        msg.soft_delete();
        let after_first = msg.clone();
        msg.soft_delete();
        assert_eq!(msg, after_first);
    }

    #[test]
    fn test_unread_rule_skips_own_messages() {
        let msg = text_message(1, 200);
        assert!(!msg.is_unread_by(Snowflake::new(200), &[]));
        assert!(msg.is_unread_by(Snowflake::new(300), &[]));
    }

    #[test]
    fn test_unread_rule_respects_read_status() {
        let msg = text_message(1, 200);
        let reader = Snowflake::new(300);
        let statuses = vec![ReadStatus::new(msg.id, reader)];
        assert!(!msg.is_unread_by(reader, &statuses));

        // A read status for a different reader does not count
        assert!(msg.is_unread_by(Snowflake::new(400), &statuses));
    }
}
