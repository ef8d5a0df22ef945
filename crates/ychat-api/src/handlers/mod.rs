//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod assistant;
pub mod auth;
pub mod health;
pub mod media;
pub mod messages;
pub mod profiles;
pub mod rooms;
pub mod studio;
pub mod subscribe;
pub mod unread;

/// Parse a Snowflake path segment, mapping failure to an invalid-path error
pub(crate) fn parse_snowflake(raw: &str, name: &str) -> Result<ychat_core::Snowflake, crate::response::ApiError> {
    raw.parse()
        .map_err(|_| crate::response::ApiError::invalid_path(format!("Invalid {name} format")))
}
