//! Timeline and message handlers
//!
//! The timeline endpoint runs the full synchronization sequence (fetch,
//! join, read-marking) on every call; clients re-invoke it on each change
//! notification for the room.

use axum::{
    extract::{Path, State},
    Json,
};
use ychat_service::{
    CreateMessageRequest, RoomTimelineService, TimelineMessageResponse, TimelineResponse,
};

use crate::extractors::{ActiveUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_snowflake;

/// Fetch the room timeline and mark unread messages as read
///
/// GET /rooms/{room_id}/timeline
pub async fn get_timeline(
    State(state): State<AppState>,
    user: ActiveUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<TimelineResponse>> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    let service = RoomTimelineService::new(state.service_context());
    let response = service.fetch(room_id, user.user_id).await?;
    Ok(Json(response))
}

/// Send a message (text content or image URL)
///
/// POST /rooms/{room_id}/messages
pub async fn create_message(
    State(state): State<AppState>,
    user: ActiveUser,
    Path(room_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<TimelineMessageResponse>>> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    let service = RoomTimelineService::new(state.service_context());
    let response = service.send_message(room_id, user.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Sender-side delete of an own message
///
/// DELETE /rooms/{room_id}/messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    user: ActiveUser,
    Path((room_id, message_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let room_id = parse_snowflake(&room_id, "room_id")?;
    let message_id = parse_snowflake(&message_id, "message_id")?;

    let service = RoomTimelineService::new(state.service_context());
    service
        .delete_message(room_id, message_id, user.user_id)
        .await?;
    Ok(NoContent)
}
