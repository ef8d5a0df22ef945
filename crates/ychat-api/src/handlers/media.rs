//! Media upload handler
//!
//! Accepts a multipart upload and forwards it to the media CDN. The caller
//! persists the returned `public_id` (avatars) or `secure_url` (message
//! images).

use axum::{
    extract::{Multipart, State},
    Json,
};
use ychat_service::{MediaService, MediaUploadResponse};

use crate::extractors::ActiveUser;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Upload one image
///
/// POST /media
pub async fn upload(
    State(state): State<AppState>,
    _user: ActiveUser,
    mut multipart: Multipart,
) -> ApiResult<Json<MediaUploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::invalid_body(e.to_string()))?;

        let service = MediaService::new(state.service_context());
        let response = service
            .upload(filename, content_type, bytes.to_vec())
            .await?;
        return Ok(Json(response));
    }

    Err(ApiError::invalid_body("Missing file field"))
}
