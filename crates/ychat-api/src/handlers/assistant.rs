//! Assistant inference proxy handlers
//!
//! Implements the proxy's original wire contract exactly: a missing or
//! empty message answers 400 `{error}` without touching the inference
//! backend, success answers `{response, model, timestamp}`, and an
//! unexpected failure answers 500 `{error, details}`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use ychat_service::{AssistantChatRequest, AssistantService};

use crate::state::AppState;

/// Generate an assistant reply
///
/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<AssistantChatRequest>,
) -> Response {
    let message = match request.message.as_deref() {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Message is required" })),
            )
                .into_response();
        }
    };

    let service = AssistantService::new(state.service_context());
    match service.chat(&message, request.model).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error",
                "details": e.to_string()
            })),
        )
            .into_response(),
    }
}
