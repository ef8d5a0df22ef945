//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod access;
pub mod assistant;
pub mod auth;
pub mod context;
pub mod error;
pub mod media;
pub mod profile;
pub mod room;
pub mod studio;
pub mod timeline;
pub mod unread;

// Re-export all services for convenience
pub use access::{AccessService, StudioAccess};
pub use assistant::AssistantService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use media::MediaService;
pub use profile::ProfileService;
pub use room::RoomService;
pub use studio::StudioService;
pub use timeline::RoomTimelineService;
pub use unread::UnreadService;
