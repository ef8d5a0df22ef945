//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AssistantChatRequest, BanUserRequest, CreateGroupRoomRequest, CreateMessageRequest,
    CreatePersonalRoomRequest, InviteParticipantsRequest, LoginRequest, LogoutRequest,
    ReassignMessageRequest, RefreshTokenRequest, RegisterRequest, RenameNicknameRequest,
    SetMessageLockRequest, UpdateMessageRequest, UpdateProfileRequest,
};

// Re-export commonly used response types
pub use responses::{
    AssistantChatResponse, AuthResponse, BanResponse, ContactUnreadResponse,
    CurrentProfileResponse, HealthResponse, MediaUploadResponse, ParticipantResponse,
    ProfileResponse, ReadinessResponse, RoomResponse, RoomSummaryResponse, SystemSettingResponse,
    TimelineMessageResponse, TimelineResponse, UnreadCountResponse, UnreadSummaryResponse,
    UserModerationResponse,
};

// Re-export mapper helper structs
pub use mappers::{ProfileWithBanState, RoomWithCount, TimelineMessage};
