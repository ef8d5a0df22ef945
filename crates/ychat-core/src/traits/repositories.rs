//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Capability checks (kill switch, bans) go
//! through these ports so access decisions can fail closed on transport
//! errors without knowing about the store.

use async_trait::async_trait;

use crate::entities::{
    Message, Profile, ReadStatus, Room, RoomParticipant, SystemSetting, UserBan,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>>;

    /// Find profile by synthetic email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Profile>>;

    /// Batch lookup for a set of ids (used by the timeline hash join)
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Profile>>;

    /// All profiles except the given user, ordered by username
    async fn find_all_except(&self, user_id: Snowflake) -> RepoResult<Vec<Profile>>;

    /// All profiles, ordered by username (studio listing)
    async fn find_all(&self) -> RepoResult<Vec<Profile>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new profile with its password hash
    async fn create(&self, profile: &Profile, password_hash: &str) -> RepoResult<()>;

    /// Update mutable profile fields (nickname, avatar, admin flag)
    async fn update(&self, profile: &Profile) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Room Repository
// ============================================================================

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>>;

    /// All rooms the user participates in
    async fn find_by_participant(&self, user_id: Snowflake) -> RepoResult<Vec<Room>>;

    /// All rooms, newest first (studio listing)
    async fn find_all(&self) -> RepoResult<Vec<Room>>;

    /// Create a new room
    async fn create(&self, room: &Room) -> RepoResult<()>;

    /// Resolve an existing 1:1 room shared by exactly this pair of users
    async fn find_personal_room(
        &self,
        user_id: Snowflake,
        other_user_id: Snowflake,
    ) -> RepoResult<Option<Snowflake>>;
}

// ============================================================================
// Participant Repository
// ============================================================================

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// All participant rows of a room
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<RoomParticipant>>;

    /// Check membership (the authorization boundary for room access)
    async fn is_participant(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Add one participant
    async fn add(&self, participant: &RoomParticipant) -> RepoResult<()>;

    /// Add several participants to a room at once
    async fn add_many(&self, room_id: Snowflake, user_ids: &[Snowflake]) -> RepoResult<()>;

    /// Remove a participant row (leaving the room)
    async fn remove(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID (including soft-deleted rows)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// All messages of a room ordered by creation time ascending
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<Message>>;

    /// Create a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Replace message content (moderation edit)
    async fn update_content(&self, id: Snowflake, content: &str) -> RepoResult<()>;

    /// Soft-delete unconditionally: set is_deleted, clear content and image.
    /// The row persists. Idempotent in effect.
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Soft-delete guarded by the lock flag; fails with `MessageLocked`
    /// when `is_locked` is set (studio delete path).
    async fn soft_delete_unlocked(&self, id: Snowflake) -> RepoResult<()>;

    /// Lock or unlock a message
    async fn set_locked(&self, id: Snowflake, locked: bool) -> RepoResult<()>;

    /// Reassign a message to a different author
    async fn reassign_author(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Number of messages in a room, soft-deleted rows included (studio)
    async fn count_by_room(&self, room_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Read Status Repository
// ============================================================================

/// One (room, unread count) pair from the per-user aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnreadCount {
    pub room_id: Snowflake,
    pub unread_count: i64,
}

#[async_trait]
pub trait ReadStatusRepository: Send + Sync {
    /// All read-status rows attached to the given messages
    async fn find_by_messages(&self, message_ids: &[Snowflake]) -> RepoResult<Vec<ReadStatus>>;

    /// Record that a user has seen a message. At-least-once: duplicate
    /// marks for an already-read message are absorbed, not errors.
    async fn mark_read(&self, message_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Ids of messages in a room the user has not yet read
    /// (no read-status row and not authored by the user)
    async fn unread_messages(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Snowflake>>;

    /// Per-room unread counts for everything the user participates in
    async fn unread_counts(&self, user_id: Snowflake) -> RepoResult<Vec<UnreadCount>>;
}

// ============================================================================
// Ban Repository
// ============================================================================

#[async_trait]
pub trait BanRepository: Send + Sync {
    /// Every ban row for a user, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<UserBan>>;

    /// Active ban rows for a user (effectiveness is evaluated in memory)
    async fn find_active_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<UserBan>>;

    /// All active ban rows across users (studio listing)
    async fn find_all_active(&self) -> RepoResult<Vec<UserBan>>;

    /// Insert a new ban row
    async fn create(&self, ban: &UserBan) -> RepoResult<()>;

    /// Flip is_active to false on every active row for the user; returns
    /// the number of rows deactivated. Rows are never physically deleted.
    async fn deactivate_for_user(&self, user_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Settings Repository
// ============================================================================

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Read the singleton settings row
    async fn get(&self) -> RepoResult<SystemSetting>;

    /// Flip the studio kill switch
    async fn set_studio_enabled(&self, enabled: bool) -> RepoResult<()>;
}
