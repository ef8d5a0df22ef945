//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs,
//! plus the helper structs services assemble before mapping.

use ychat_core::entities::{Message, Profile, Room, RoomParticipant, SystemSetting, UserBan};
use ychat_core::Snowflake;

use super::responses::{
    BanResponse, CurrentProfileResponse, ParticipantResponse, ProfileResponse, RoomResponse,
    RoomSummaryResponse, SystemSettingResponse, TimelineMessageResponse, UserModerationResponse,
};

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.clone(),
            nickname: profile.nickname.clone(),
            avatar_public_id: profile.avatar_public_id.clone(),
            created_at: profile.created_at,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self::from(&profile)
    }
}

impl From<&Profile> for CurrentProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.clone(),
            email: profile.email.clone(),
            nickname: profile.nickname.clone(),
            avatar_public_id: profile.avatar_public_id.clone(),
            is_admin: profile.is_admin,
            created_at: profile.created_at,
        }
    }
}

impl From<Profile> for CurrentProfileResponse {
    fn from(profile: Profile) -> Self {
        Self::from(&profile)
    }
}

/// Profile joined with its computed ban state (studio listing)
#[derive(Debug, Clone)]
pub struct ProfileWithBanState {
    pub profile: Profile,
    pub is_banned: bool,
}

impl From<ProfileWithBanState> for UserModerationResponse {
    fn from(entry: ProfileWithBanState) -> Self {
        Self {
            id: entry.profile.id.to_string(),
            username: entry.profile.username,
            nickname: entry.profile.nickname,
            is_banned: entry.is_banned,
        }
    }
}

// ============================================================================
// Room Mappers
// ============================================================================

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            name: room.name.clone(),
            is_group: room.is_group,
            created_by: room.created_by.to_string(),
            created_at: room.created_at,
        }
    }
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self::from(&room)
    }
}

/// Room joined with its message count (studio listing)
#[derive(Debug, Clone)]
pub struct RoomWithCount {
    pub room: Room,
    pub message_count: i64,
}

impl From<RoomWithCount> for RoomSummaryResponse {
    fn from(entry: RoomWithCount) -> Self {
        Self {
            id: entry.room.id.to_string(),
            name: entry.room.name,
            is_group: entry.room.is_group,
            created_at: entry.room.created_at,
            message_count: entry.message_count,
        }
    }
}

impl From<&RoomParticipant> for ParticipantResponse {
    fn from(participant: &RoomParticipant) -> Self {
        Self {
            room_id: participant.room_id.to_string(),
            user_id: participant.user_id.to_string(),
            joined_at: participant.joined_at,
        }
    }
}

// ============================================================================
// Timeline Mappers
// ============================================================================

/// A message with its locally joined author and read receipts
#[derive(Debug, Clone)]
pub struct TimelineMessage {
    pub message: Message,
    pub author: Option<Profile>,
    pub read_by: Vec<Snowflake>,
}

impl From<TimelineMessage> for TimelineMessageResponse {
    fn from(entry: TimelineMessage) -> Self {
        Self {
            id: entry.message.id.to_string(),
            room_id: entry.message.room_id.to_string(),
            user_id: entry.message.user_id.to_string(),
            content: entry.message.content,
            image_url: entry.message.image_url,
            is_deleted: entry.message.is_deleted,
            is_locked: entry.message.is_locked,
            created_at: entry.message.created_at,
            author: entry.author.as_ref().map(ProfileResponse::from),
            read_by: entry.read_by.iter().map(Snowflake::to_string).collect(),
        }
    }
}

// ============================================================================
// Ban and Settings Mappers
// ============================================================================

impl From<&UserBan> for BanResponse {
    fn from(ban: &UserBan) -> Self {
        Self {
            id: ban.id.to_string(),
            user_id: ban.user_id.to_string(),
            banned_by: ban.banned_by.to_string(),
            reason: ban.reason.clone(),
            expires_at: ban.expires_at,
            is_active: ban.is_active,
            created_at: ban.created_at,
        }
    }
}

impl From<UserBan> for BanResponse {
    fn from(ban: UserBan) -> Self {
        Self::from(&ban)
    }
}

impl From<SystemSetting> for SystemSettingResponse {
    fn from(setting: SystemSetting) -> Self {
        Self {
            studio_enabled: setting.studio_enabled,
            updated_at: setting.updated_at,
        }
    }
}
