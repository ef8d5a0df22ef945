//! # ychat-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    AssistantChatRequest, AssistantChatResponse, AuthResponse, BanResponse, BanUserRequest,
    ContactUnreadResponse, CreateGroupRoomRequest, CreateMessageRequest, CreatePersonalRoomRequest,
    CurrentProfileResponse, HealthResponse, InviteParticipantsRequest, LoginRequest, LogoutRequest,
    MediaUploadResponse, ParticipantResponse, ProfileResponse, ReadinessResponse, RefreshTokenRequest,
    RegisterRequest, RenameNicknameRequest, ReassignMessageRequest, RoomResponse,
    RoomSummaryResponse, SetMessageLockRequest, SystemSettingResponse, TimelineMessageResponse,
    TimelineResponse, UnreadCountResponse, UnreadSummaryResponse, UpdateMessageRequest,
    UpdateProfileRequest, UserModerationResponse,
};
pub use services::{
    AccessService, AssistantService, AuthService, MediaService, ProfileService, RoomService,
    RoomTimelineService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    StudioAccess, StudioService, UnreadService,
};
