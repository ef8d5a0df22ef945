//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Room not found: {0}")]
    RoomNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Not a participant of this room")]
    ParticipantNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the author of this message")]
    NotMessageAuthor,

    #[error("Administrator privileges required")]
    NotAdmin,

    #[error("The studio is disabled by the emergency stop")]
    StudioDisabled,

    #[error("Account is suspended")]
    UserBanned,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Already a participant of this room")]
    AlreadyParticipant,

    #[error("Message is locked and cannot be deleted")]
    MessageLocked,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::ParticipantNotFound => "UNKNOWN_PARTICIPANT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Authorization
            Self::NotMessageAuthor => "NOT_MESSAGE_AUTHOR",
            Self::NotAdmin => "NOT_ADMIN",
            Self::StudioDisabled => "STUDIO_DISABLED",
            Self::UserBanned => "USER_BANNED",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::AlreadyParticipant => "ALREADY_PARTICIPANT",
            Self::MessageLocked => "MESSAGE_LOCKED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RoomNotFound(_)
                | Self::MessageNotFound(_)
                | Self::ParticipantNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidUsername(_) | Self::WeakPassword(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotMessageAuthor | Self::NotAdmin | Self::StudioDisabled | Self::UserBanned
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists | Self::AlreadyParticipant | Self::MessageLocked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(DomainError::RoomNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::WeakPassword("too short".to_string()).is_validation());
        assert!(DomainError::StudioDisabled.is_authorization());
        assert!(DomainError::MessageLocked.is_conflict());
        assert!(!DomainError::DatabaseError("boom".to_string()).is_conflict());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::MessageLocked.code(), "MESSAGE_LOCKED");
        assert_eq!(DomainError::StudioDisabled.code(), "STUDIO_DISABLED");
        assert_eq!(DomainError::NotAdmin.code(), "NOT_ADMIN");
    }
}
