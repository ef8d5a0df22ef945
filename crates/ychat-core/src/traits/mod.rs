//! Repository traits (ports) for the domain layer

mod repositories;

pub use repositories::{
    BanRepository, MessageRepository, ParticipantRepository, ProfileRepository,
    ReadStatusRepository, RepoResult, RoomRepository, SettingsRepository, UnreadCount,
};
