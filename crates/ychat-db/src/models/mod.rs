//! Database models - SQLx-compatible structs for PostgreSQL tables
//!
//! Each model carries its `From<Model>` conversion into the corresponding
//! domain entity.

mod ban;
mod message;
mod profile;
mod room;
mod setting;

pub use ban::BanModel;
pub use message::{MessageModel, ReadStatusModel, UnreadCountModel};
pub use profile::ProfileModel;
pub use room::{ParticipantModel, RoomModel};
pub use setting::SystemSettingModel;
