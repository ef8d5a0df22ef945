//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentProfileResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentProfileResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// Profile Responses
// ============================================================================

/// Public profile response
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_public_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated profile response (includes email and admin flag)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_public_id: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Room Responses
// ============================================================================

/// Room response
#[derive(Debug, Clone, Serialize)]
pub struct RoomResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_group: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Room response with message count (studio listing)
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummaryResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_group: bool,
    pub created_at: DateTime<Utc>,
    pub message_count: i64,
}

/// Participant response
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantResponse {
    pub room_id: String,
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
}

// ============================================================================
// Timeline Responses
// ============================================================================

/// One message in a room timeline, with resolved author and read receipts
#[derive(Debug, Clone, Serialize)]
pub struct TimelineMessageResponse {
    pub id: String,
    pub room_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_deleted: bool,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
    /// Author profile; None when the account no longer resolves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<ProfileResponse>,
    /// IDs of users who have read this message
    pub read_by: Vec<String>,
}

/// The materialized view of one room: metadata plus the ordered messages
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub room: RoomResponse,
    pub messages: Vec<TimelineMessageResponse>,
}

// ============================================================================
// Unread Responses
// ============================================================================

/// Per-room unread count
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub room_id: String,
    pub unread_count: i64,
}

/// Unread badge for a 1:1 contact, addressable by counterpart
#[derive(Debug, Clone, Serialize)]
pub struct ContactUnreadResponse {
    pub user_id: String,
    pub room_id: String,
    pub unread_count: i64,
}

/// Full unread snapshot for the current user; replaces any previous one
/// wholesale
#[derive(Debug, Serialize)]
pub struct UnreadSummaryResponse {
    pub counts: Vec<UnreadCountResponse>,
    pub contacts: Vec<ContactUnreadResponse>,
}

// ============================================================================
// Studio Responses
// ============================================================================

/// Ban response
#[derive(Debug, Clone, Serialize)]
pub struct BanResponse {
    pub id: String,
    pub user_id: String,
    pub banned_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// None = permanent
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Studio user listing entry with computed ban state
#[derive(Debug, Clone, Serialize)]
pub struct UserModerationResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub is_banned: bool,
}

/// System settings response
#[derive(Debug, Clone, Serialize)]
pub struct SystemSettingResponse {
    pub studio_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Media Responses
// ============================================================================

/// Result of an image upload forwarded to the media CDN
#[derive(Debug, Clone, Serialize)]
pub struct MediaUploadResponse {
    pub secure_url: String,
    pub public_id: String,
}

// ============================================================================
// Assistant Responses
// ============================================================================

/// Inference proxy success response
#[derive(Debug, Clone, Serialize)]
pub struct AssistantChatResponse {
    pub response: String,
    /// Echoes the request's model field verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub timestamp: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Y-Chat server is running".to_string(),
        }
    }
}

/// Readiness response with dependency checks
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool, redis: bool) -> Self {
        let status = if database && redis { "ready" } else { "degraded" };
        Self {
            status: status.to_string(),
            database,
            redis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "ok");
    }

    #[test]
    fn test_readiness_response() {
        assert_eq!(ReadinessResponse::ready(true, true).status, "ready");
        assert_eq!(ReadinessResponse::ready(true, false).status, "degraded");
    }

    #[test]
    fn test_assistant_response_omits_missing_model() {
        let response = AssistantChatResponse {
            response: "hi".to_string(),
            model: None,
            timestamp: "2025-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("model"));
    }
}
