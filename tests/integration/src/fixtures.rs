//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: ProfileResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// Profile response
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub avatar_public_id: Option<String>,
    pub is_admin: Option<bool>,
}

/// Create group room request
#[derive(Debug, Serialize)]
pub struct CreateGroupRoomRequest {
    pub name: String,
    pub member_ids: Vec<String>,
}

impl CreateGroupRoomRequest {
    pub fn unique(member_ids: Vec<String>) -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Room {suffix}"),
            member_ids,
        }
    }
}

/// Room response
#[derive(Debug, Deserialize)]
pub struct RoomResponse {
    pub id: String,
    pub name: Option<String>,
    pub is_group: bool,
    pub created_by: String,
}

/// Create message request
#[derive(Debug, Serialize)]
pub struct CreateMessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CreateMessageRequest {
    pub fn text(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            image_url: None,
        }
    }
}

/// Timeline message response
#[derive(Debug, Deserialize)]
pub struct TimelineMessageResponse {
    pub id: String,
    pub room_id: String,
    pub user_id: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_deleted: bool,
    pub is_locked: bool,
    pub author: Option<TimelineAuthor>,
    pub read_by: Vec<String>,
}

/// Author inside a timeline message
#[derive(Debug, Deserialize)]
pub struct TimelineAuthor {
    pub id: String,
    pub username: String,
}

/// Timeline response
#[derive(Debug, Deserialize)]
pub struct TimelineResponse {
    pub room: RoomResponse,
    pub messages: Vec<TimelineMessageResponse>,
}

/// Unread summary response
#[derive(Debug, Deserialize)]
pub struct UnreadSummaryResponse {
    pub counts: Vec<UnreadCountResponse>,
    pub contacts: Vec<ContactUnreadResponse>,
}

/// Per-room unread count
#[derive(Debug, Deserialize)]
pub struct UnreadCountResponse {
    pub room_id: String,
    pub unread_count: i64,
}

/// Per-contact unread badge
#[derive(Debug, Deserialize)]
pub struct ContactUnreadResponse {
    pub user_id: String,
    pub room_id: String,
    pub unread_count: i64,
}

/// Ban request
#[derive(Debug, Serialize)]
pub struct BanUserRequest {
    pub duration: String,
    pub reason: Option<String>,
}

/// Ban response
#[derive(Debug, Deserialize)]
pub struct BanResponse {
    pub id: String,
    pub user_id: String,
    pub expires_at: Option<String>,
    pub is_active: bool,
}

/// Assistant chat response
#[derive(Debug, Deserialize)]
pub struct AssistantChatResponse {
    pub response: String,
    pub model: Option<String>,
    pub timestamp: String,
}
