//! Axum extractors for request handling
//!
//! Custom extractors for authentication, the ban gate, and validation.

mod auth;
mod validated;

pub use auth::{ActiveUser, AuthUser};
pub use validated::ValidatedJson;
