//! Room handlers
//!
//! Endpoints for room listing, creation, invitations, and leaving.

use axum::{
    extract::{Path, State},
    Json,
};
use ychat_service::{
    CreateGroupRoomRequest, CreatePersonalRoomRequest, InviteParticipantsRequest,
    ParticipantResponse, ProfileResponse, RoomResponse, RoomService,
};

use crate::extractors::{ActiveUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_snowflake;

/// List the current user's rooms
///
/// GET /rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    user: ActiveUser,
) -> ApiResult<Json<Vec<RoomResponse>>> {
    let service = RoomService::new(state.service_context());
    let response = service.list_rooms(user.user_id).await?;
    Ok(Json(response))
}

/// Create a group room
///
/// POST /rooms
pub async fn create_group_room(
    State(state): State<AppState>,
    user: ActiveUser,
    ValidatedJson(request): ValidatedJson<CreateGroupRoomRequest>,
) -> ApiResult<Created<Json<RoomResponse>>> {
    let service = RoomService::new(state.service_context());
    let response = service.create_group_room(user.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Open (or resolve) a personal 1:1 room
///
/// POST /rooms/personal
pub async fn open_personal_room(
    State(state): State<AppState>,
    user: ActiveUser,
    Json(request): Json<CreatePersonalRoomRequest>,
) -> ApiResult<Json<RoomResponse>> {
    let service = RoomService::new(state.service_context());
    let response = service.open_personal_room(user.user_id, request).await?;
    Ok(Json(response))
}

/// Get one room
///
/// GET /rooms/{room_id}
pub async fn get_room(
    State(state): State<AppState>,
    user: ActiveUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<RoomResponse>> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    let service = RoomService::new(state.service_context());
    let response = service.get_room(room_id, user.user_id).await?;
    Ok(Json(response))
}

/// List a room's participants
///
/// GET /rooms/{room_id}/participants
pub async fn list_participants(
    State(state): State<AppState>,
    user: ActiveUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<Vec<ParticipantResponse>>> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    let service = RoomService::new(state.service_context());
    let response = service.list_participants(room_id, user.user_id).await?;
    Ok(Json(response))
}

/// Profiles that can still be invited into the room
///
/// GET /rooms/{room_id}/invitable
pub async fn invitable_profiles(
    State(state): State<AppState>,
    user: ActiveUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<Vec<ProfileResponse>>> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    let service = RoomService::new(state.service_context());
    let response = service.invitable_profiles(room_id, user.user_id).await?;
    Ok(Json(response))
}

/// Invite users into the room
///
/// POST /rooms/{room_id}/invite
pub async fn invite(
    State(state): State<AppState>,
    user: ActiveUser,
    Path(room_id): Path<String>,
    ValidatedJson(request): ValidatedJson<InviteParticipantsRequest>,
) -> ApiResult<NoContent> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    let service = RoomService::new(state.service_context());
    service.invite(room_id, user.user_id, request).await?;
    Ok(NoContent)
}

/// Leave the room
///
/// DELETE /rooms/{room_id}/participants/@me
pub async fn leave_room(
    State(state): State<AppState>,
    user: ActiveUser,
    Path(room_id): Path<String>,
) -> ApiResult<NoContent> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    let service = RoomService::new(state.service_context());
    service.leave(room_id, user.user_id).await?;
    Ok(NoContent)
}
