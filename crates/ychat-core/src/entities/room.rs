//! Room entity - a conversation scope, either 1:1 or group

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Room entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: Snowflake,
    pub name: Option<String>,
    pub is_group: bool,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create a new group room
    pub fn new_group(id: Snowflake, name: String, created_by: Snowflake) -> Self {
        Self {
            id,
            name: Some(name),
            is_group: true,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Create a new 1:1 room, named after the counterpart
    pub fn new_personal(id: Snowflake, name: Option<String>, created_by: Snowflake) -> Self {
        Self {
            id,
            name,
            is_group: false,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Check if this is a 1:1 room
    #[inline]
    pub fn is_personal(&self) -> bool {
        !self.is_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_room() {
        let room = Room::new_group(Snowflake::new(1), "devs".to_string(), Snowflake::new(7));
        assert!(room.is_group);
        assert!(!room.is_personal());
        assert_eq!(room.name.as_deref(), Some("devs"));
    }

    #[test]
    fn test_personal_room() {
        let room = Room::new_personal(Snowflake::new(2), None, Snowflake::new(7));
        assert!(room.is_personal());
        assert!(room.name.is_none());
    }
}
