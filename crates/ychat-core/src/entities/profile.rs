//! Profile entity - one row per authenticated identity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User profile entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Snowflake,
    /// Immutable login name, unique across the system
    pub username: String,
    /// Synthetic email derived from the username at sign-up
    pub email: String,
    pub nickname: Option<String>,
    /// Public id of the avatar image at the media CDN
    pub avatar_public_id: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Domain suffix for synthetic email addresses
pub const SYNTHETIC_EMAIL_DOMAIN: &str = "users.ychat.local";

impl Profile {
    /// Create a new Profile for a freshly registered username
    pub fn new(id: Snowflake, username: String) -> Self {
        let email = Self::synthetic_email(&username);
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            nickname: None,
            avatar_public_id: None,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Map a username to its synthetic email address
    pub fn synthetic_email(username: &str) -> String {
        format!("{}@{}", username.to_lowercase(), SYNTHETIC_EMAIL_DOMAIN)
    }

    /// Display name: nickname when set, username otherwise
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }

    /// Delivery URL for the avatar at the media CDN, if an avatar is set
    pub fn avatar_url(&self, cloud_name: &str) -> Option<String> {
        self.avatar_public_id
            .as_ref()
            .map(|public_id| format!("https://res.cloudinary.com/{cloud_name}/image/upload/{public_id}"))
    }

    /// Update the nickname
    pub fn set_nickname(&mut self, nickname: Option<String>) {
        self.nickname = nickname;
        self.updated_at = Utc::now();
    }

    /// Update the avatar reference
    pub fn set_avatar(&mut self, public_id: Option<String>) {
        self.avatar_public_id = public_id;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_email() {
        assert_eq!(
            Profile::synthetic_email("Alice"),
            "alice@users.ychat.local"
        );
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut profile = Profile::new(Snowflake::new(1), "alice".to_string());
        assert_eq!(profile.display_name(), "alice");

        profile.set_nickname(Some("Ali".to_string()));
        assert_eq!(profile.display_name(), "Ali");
    }

    #[test]
    fn test_avatar_url() {
        let mut profile = Profile::new(Snowflake::new(1), "alice".to_string());
        assert!(profile.avatar_url("demo").is_none());

        profile.set_avatar(Some("v1/abc123".to_string()));
        assert_eq!(
            profile.avatar_url("demo").as_deref(),
            Some("https://res.cloudinary.com/demo/image/upload/v1/abc123")
        );
    }
}
