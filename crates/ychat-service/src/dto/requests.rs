//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; most also implement `Validate`
//! for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request (username only; the email is synthesized)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update own profile request (username is immutable)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 32, message = "Nickname must be at most 32 characters"))]
    pub nickname: Option<String>,

    /// Media CDN public id, or null to remove the avatar
    pub avatar_public_id: Option<String>,
}

// ============================================================================
// Room Requests
// ============================================================================

/// Create group room request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRoomRequest {
    #[validate(length(min = 1, max = 100, message = "Room name must be 1-100 characters"))]
    pub name: String,

    /// Initial members besides the creator (Snowflake IDs as strings)
    #[validate(length(min = 1, message = "Select at least one member"))]
    pub member_ids: Vec<String>,
}

/// Open (or create) a personal 1:1 room with another user
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePersonalRoomRequest {
    /// The other user's ID (Snowflake as string)
    pub user_id: String,
}

/// Invite additional participants into a room
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteParticipantsRequest {
    #[validate(length(min = 1, message = "Select at least one user"))]
    pub user_ids: Vec<String>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Create message request: exactly one of content / image_url
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: Option<String>,

    /// Direct URL of an already-uploaded image
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Edit message content (studio)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,
}

/// Lock or unlock a message (studio)
#[derive(Debug, Clone, Deserialize)]
pub struct SetMessageLockRequest {
    pub locked: bool,
}

/// Reassign a message's author (studio)
#[derive(Debug, Clone, Deserialize)]
pub struct ReassignMessageRequest {
    /// New author's ID (Snowflake as string)
    pub user_id: String,
}

// ============================================================================
// Studio User Requests
// ============================================================================

/// Rename a user's nickname (studio)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameNicknameRequest {
    #[validate(length(max = 32, message = "Nickname must be at most 32 characters"))]
    pub nickname: String,
}

/// Ban a user (studio)
#[derive(Debug, Clone, Deserialize)]
pub struct BanUserRequest {
    /// Duration code: "1" = 60s, "2" = 5min, "3" = 1h, "4" = 1day,
    /// "5" = 1year, "6" = permanent
    pub duration: String,

    pub reason: Option<String>,
}

// ============================================================================
// Assistant Requests
// ============================================================================

/// Chat request for the inference proxy.
///
/// `message` is optional at the wire level so a missing field can be
/// answered with the proxy's own 400 shape instead of a deserialization
/// rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantChatRequest {
    pub message: Option<String>,
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            username: "alice".to_string(),
            password: "GoodPassword1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest {
            username: "a".to_string(),
            password: "GoodPassword1".to_string(),
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_assistant_request_accepts_missing_fields() {
        let req: AssistantChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_none());
        assert!(req.model.is_none());

        let req: AssistantChatRequest =
            serde_json::from_str(r#"{"message":"hi","model":"V1c"}"#).unwrap();
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert_eq!(req.model.as_deref(), Some("V1c"));
    }
}
