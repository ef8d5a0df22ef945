//! Unread tracking handlers

use axum::{extract::State, Json};
use ychat_service::{UnreadService, UnreadSummaryResponse};

use crate::extractors::ActiveUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Full unread snapshot for the current user (per-room counts plus
/// per-contact badges); replaces any previous snapshot wholesale
///
/// GET /unread
pub async fn get_unread_summary(
    State(state): State<AppState>,
    user: ActiveUser,
) -> ApiResult<Json<UnreadSummaryResponse>> {
    let service = UnreadService::new(state.service_context());
    let response = service.summary(user.user_id).await?;
    Ok(Json(response))
}
