//! Route definitions
//!
//! API routes organized by domain. The versioned chat API lives under
//! /api/v1; the inference proxy keeps its original /api/chat and /health
//! paths.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    assistant, auth, health, media, messages, profiles, rooms, studio, subscribe, unread,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health, which is
/// mounted separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Inference proxy keeps its legacy path
        .route("/api/chat", post(assistant::chat))
        // Chat API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(room_routes())
        .merge(studio_routes())
        .route("/unread", get(unread::get_unread_summary))
        .route("/subscribe", get(subscribe::subscribe_events))
        .route("/media", post(media::upload))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(profiles::get_current_profile))
        .route("/users/@me", patch(profiles::update_current_profile))
        .route("/users", get(profiles::list_contacts))
        .route("/users/:user_id", get(profiles::get_profile))
}

/// Room routes
fn room_routes() -> Router<AppState> {
    Router::new()
        // Room CRUD
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms", post(rooms::create_group_room))
        .route("/rooms/personal", post(rooms::open_personal_room))
        .route("/rooms/:room_id", get(rooms::get_room))
        // Participants
        .route("/rooms/:room_id/participants", get(rooms::list_participants))
        .route("/rooms/:room_id/participants/@me", delete(rooms::leave_room))
        .route("/rooms/:room_id/invitable", get(rooms::invitable_profiles))
        .route("/rooms/:room_id/invite", post(rooms::invite))
        // Timeline and messages
        .route("/rooms/:room_id/timeline", get(messages::get_timeline))
        .route("/rooms/:room_id/messages", post(messages::create_message))
        .route(
            "/rooms/:room_id/messages/:message_id",
            delete(messages::delete_message),
        )
        // Change-notification feed
        .route("/rooms/:room_id/subscribe", get(subscribe::subscribe_room))
}

/// Studio (moderation console) routes
fn studio_routes() -> Router<AppState> {
    Router::new()
        .route("/studio/access", get(studio::check_access))
        .route("/studio/rooms", get(studio::list_rooms))
        .route("/studio/rooms/:room_id/messages", get(studio::list_messages))
        .route("/studio/users", get(studio::list_users))
        .route("/studio/users/:user_id/nickname", patch(studio::rename_nickname))
        .route("/studio/users/:user_id/ban", post(studio::ban_user))
        .route("/studio/users/:user_id/ban", delete(studio::unban_user))
        .route("/studio/messages/:message_id", patch(studio::edit_message))
        .route("/studio/messages/:message_id", delete(studio::delete_message))
        .route("/studio/messages/:message_id/lock", put(studio::set_message_lock))
        .route("/studio/messages/:message_id/author", patch(studio::reassign_message))
        .route("/studio/settings", get(studio::get_settings))
        .route("/studio/emergency-stop", post(studio::emergency_stop))
}
