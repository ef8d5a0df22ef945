//! Studio (moderation console) handlers
//!
//! Every operation is gated by the access guard inside the service layer:
//! kill switch first, admin flag second, both failing closed. The access
//! probe endpoint lets the client render the matching denial screen.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use ychat_service::{
    AccessService, BanResponse, BanUserRequest, ReassignMessageRequest, RenameNicknameRequest,
    RoomSummaryResponse, SetMessageLockRequest, StudioAccess, StudioService,
    SystemSettingResponse, TimelineMessageResponse, UpdateMessageRequest, UserModerationResponse,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

use super::parse_snowflake;

/// Probe the caller's studio access
///
/// GET /studio/access
pub async fn check_access(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let access = AccessService::new(state.service_context())
        .check_studio_access(auth.user_id)
        .await;

    let label = match access {
        StudioAccess::Granted => "granted",
        StudioAccess::DeniedKillSwitch => "denied_killswitch",
        StudioAccess::DeniedNotAdmin => "denied_not_admin",
    };

    Ok(Json(json!({ "access": label })))
}

/// List all rooms with message counts
///
/// GET /studio/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RoomSummaryResponse>>> {
    let service = StudioService::new(state.service_context());
    let response = service.list_rooms(auth.user_id).await?;
    Ok(Json(response))
}

/// List one room's messages for moderation
///
/// GET /studio/rooms/{room_id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<Vec<TimelineMessageResponse>>> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    let service = StudioService::new(state.service_context());
    let response = service.list_messages(auth.user_id, room_id).await?;
    Ok(Json(response))
}

/// List all users with computed ban state
///
/// GET /studio/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserModerationResponse>>> {
    let service = StudioService::new(state.service_context());
    let response = service.list_users(auth.user_id).await?;
    Ok(Json(response))
}

/// Edit a message's content
///
/// PATCH /studio/messages/{message_id}
pub async fn edit_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMessageRequest>,
) -> ApiResult<NoContent> {
    let message_id = parse_snowflake(&message_id, "message_id")?;

    let service = StudioService::new(state.service_context());
    service.edit_message(auth.user_id, message_id, request).await?;
    Ok(NoContent)
}

/// Soft-delete a message (rejected while locked)
///
/// DELETE /studio/messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
) -> ApiResult<NoContent> {
    let message_id = parse_snowflake(&message_id, "message_id")?;

    let service = StudioService::new(state.service_context());
    service.delete_message(auth.user_id, message_id).await?;
    Ok(NoContent)
}

/// Lock or unlock a message
///
/// PUT /studio/messages/{message_id}/lock
pub async fn set_message_lock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
    Json(request): Json<SetMessageLockRequest>,
) -> ApiResult<NoContent> {
    let message_id = parse_snowflake(&message_id, "message_id")?;

    let service = StudioService::new(state.service_context());
    service
        .set_message_lock(auth.user_id, message_id, request)
        .await?;
    Ok(NoContent)
}

/// Reassign a message's author
///
/// PATCH /studio/messages/{message_id}/author
pub async fn reassign_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
    Json(request): Json<ReassignMessageRequest>,
) -> ApiResult<NoContent> {
    let message_id = parse_snowflake(&message_id, "message_id")?;

    let service = StudioService::new(state.service_context());
    service
        .reassign_message(auth.user_id, message_id, request)
        .await?;
    Ok(NoContent)
}

/// Rename a user's nickname
///
/// PATCH /studio/users/{user_id}/nickname
pub async fn rename_nickname(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<RenameNicknameRequest>,
) -> ApiResult<NoContent> {
    let user_id = parse_snowflake(&user_id, "user_id")?;

    let service = StudioService::new(state.service_context());
    service
        .rename_nickname(auth.user_id, user_id, request)
        .await?;
    Ok(NoContent)
}

/// Ban a user
///
/// POST /studio/users/{user_id}/ban
pub async fn ban_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    Json(request): Json<BanUserRequest>,
) -> ApiResult<Json<BanResponse>> {
    let user_id = parse_snowflake(&user_id, "user_id")?;

    let service = StudioService::new(state.service_context());
    let response = service.ban_user(auth.user_id, user_id, request).await?;
    Ok(Json(response))
}

/// Unban a user (deactivate every active ban row)
///
/// DELETE /studio/users/{user_id}/ban
pub async fn unban_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let user_id = parse_snowflake(&user_id, "user_id")?;

    let service = StudioService::new(state.service_context());
    service.unban_user(auth.user_id, user_id).await?;
    Ok(NoContent)
}

/// Read the kill-switch state
///
/// GET /studio/settings
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SystemSettingResponse>> {
    let service = StudioService::new(state.service_context());
    let response = service.get_settings(auth.user_id).await?;
    Ok(Json(response))
}

/// Emergency stop: disable the studio for everyone
///
/// POST /studio/emergency-stop
pub async fn emergency_stop(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = StudioService::new(state.service_context());
    service.emergency_stop(auth.user_id).await?;
    Ok(NoContent)
}
