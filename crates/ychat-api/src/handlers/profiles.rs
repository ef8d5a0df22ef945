//! Profile handlers
//!
//! Endpoints for profile reads, the contact list, and owner-side updates.

use axum::{
    extract::{Path, State},
    Json,
};
use ychat_service::{
    CurrentProfileResponse, ProfileResponse, ProfileService, UpdateProfileRequest,
};

use crate::extractors::{ActiveUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

use super::parse_snowflake;

/// Get the current user's profile
///
/// GET /users/@me
pub async fn get_current_profile(
    State(state): State<AppState>,
    user: ActiveUser,
) -> ApiResult<Json<CurrentProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.get_current_profile(user.user_id).await?;
    Ok(Json(response))
}

/// Update the current user's nickname and/or avatar
///
/// PATCH /users/@me
pub async fn update_current_profile(
    State(state): State<AppState>,
    user: ActiveUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.update_profile(user.user_id, request).await?;
    Ok(Json(response))
}

/// List every other profile (the contact list)
///
/// GET /users
pub async fn list_contacts(
    State(state): State<AppState>,
    user: ActiveUser,
) -> ApiResult<Json<Vec<ProfileResponse>>> {
    let service = ProfileService::new(state.service_context());
    let response = service.list_contacts(user.user_id).await?;
    Ok(Json(response))
}

/// Get a user's public profile
///
/// GET /users/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    _user: ActiveUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = parse_snowflake(&user_id, "user_id")?;

    let service = ProfileService::new(state.service_context());
    let response = service.get_profile(user_id).await?;
    Ok(Json(response))
}
