//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (schema applied)
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");

    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    // The synthetic email is derived from the username
    let email = auth.user.email.expect("email missing");
    assert!(email.starts_with(&request.username.to_lowercase()));
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/v1/auth/register", &request).await.unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.username, register_req.username);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        username: "nonexistentuser".to_string(),
        password: "WrongPass123".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({ "refresh_token": auth.refresh_token }),
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!refreshed.access_token.is_empty());
    assert_ne!(refreshed.refresh_token, auth.refresh_token);
}

// ============================================================================
// Room and Timeline Tests
// ============================================================================

/// Register a user and return (auth, server-side id)
async fn register(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_group_room_message_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;

    // Alice creates a group room containing Bob
    let room_req = CreateGroupRoomRequest::unique(vec![bob.user.id.clone()]);
    let response = server
        .post_auth("/api/v1/rooms", &alice.access_token, &room_req)
        .await
        .unwrap();
    let room: RoomResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(room.is_group);

    // Alice sends "hello"
    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/messages", room.id),
            &alice.access_token,
            &CreateMessageRequest::text("hello"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Before Bob fetches, the message counts as unread for him
    let response = server
        .get_auth("/api/v1/unread", &bob.access_token)
        .await
        .unwrap();
    let unread: UnreadSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let room_count = unread
        .counts
        .iter()
        .find(|c| c.room_id == room.id)
        .map(|c| c.unread_count)
        .unwrap_or(0);
    assert_eq!(room_count, 1);

    // Bob fetches the timeline: exactly one message with content "hello",
    // Alice's profile attached, and no read receipt for Bob yet (the fetch
    // itself performs the marking)
    let response = server
        .get_auth(
            &format!("/api/v1/rooms/{}/timeline", room.id),
            &bob.access_token,
        )
        .await
        .unwrap();
    let timeline: TimelineResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(timeline.messages.len(), 1);
    let message = &timeline.messages[0];
    assert_eq!(message.content.as_deref(), Some("hello"));
    assert_eq!(
        message.author.as_ref().map(|a| a.username.as_str()),
        Some(alice.user.username.as_str())
    );
    assert!(!message.read_by.contains(&bob.user.id));

    // The fetch marked the message read: the unread count drops to zero and
    // the next snapshot carries Bob's receipt
    let response = server
        .get_auth("/api/v1/unread", &bob.access_token)
        .await
        .unwrap();
    let unread: UnreadSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let room_count = unread
        .counts
        .iter()
        .find(|c| c.room_id == room.id)
        .map(|c| c.unread_count)
        .unwrap_or(0);
    assert_eq!(room_count, 0);

    let response = server
        .get_auth(
            &format!("/api/v1/rooms/{}/timeline", room.id),
            &bob.access_token,
        )
        .await
        .unwrap();
    let timeline: TimelineResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(timeline.messages[0].read_by.contains(&bob.user.id));

    // The author's own message is never unread for the author
    let response = server
        .get_auth("/api/v1/unread", &alice.access_token)
        .await
        .unwrap();
    let unread: UnreadSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(unread.counts.iter().all(|c| c.room_id != room.id || c.unread_count == 0));
}

#[tokio::test]
async fn test_room_access_requires_participation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;
    let carol = register(&server).await;

    let room_req = CreateGroupRoomRequest::unique(vec![bob.user.id.clone()]);
    let response = server
        .post_auth("/api/v1/rooms", &alice.access_token, &room_req)
        .await
        .unwrap();
    let room: RoomResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Carol holds no participant row and cannot even observe the room
    let response = server
        .get_auth(
            &format!("/api/v1/rooms/{}/timeline", room.id),
            &carol.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_personal_room_resolves_existing_pair() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;

    let request = json!({ "user_id": bob.user.id });
    let response = server
        .post_auth("/api/v1/rooms/personal", &alice.access_token, &request)
        .await
        .unwrap();
    let first: RoomResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!first.is_group);

    // Opening again from either side resolves the same room
    let request = json!({ "user_id": alice.user.id });
    let response = server
        .post_auth("/api/v1/rooms/personal", &bob.access_token, &request)
        .await
        .unwrap();
    let second: RoomResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_sender_delete_own_message_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;

    let room_req = CreateGroupRoomRequest::unique(vec![bob.user.id.clone()]);
    let response = server
        .post_auth("/api/v1/rooms", &alice.access_token, &room_req)
        .await
        .unwrap();
    let room: RoomResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/messages", room.id),
            &alice.access_token,
            &CreateMessageRequest::text("to be deleted"),
        )
        .await
        .unwrap();
    let message: TimelineMessageResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    // Bob cannot delete Alice's message
    let response = server
        .delete_auth(
            &format!("/api/v1/rooms/{}/messages/{}", room.id, message.id),
            &bob.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Alice can; the row persists soft-deleted with its payload cleared
    let response = server
        .delete_auth(
            &format!("/api/v1/rooms/{}/messages/{}", room.id, message.id),
            &alice.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/rooms/{}/timeline", room.id),
            &alice.access_token,
        )
        .await
        .unwrap();
    let timeline: TimelineResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let deleted = timeline.messages.iter().find(|m| m.id == message.id).unwrap();
    assert!(deleted.is_deleted);
    assert!(deleted.content.is_none());
    assert!(deleted.image_url.is_none());
}

// ============================================================================
// Studio Tests
// ============================================================================

/// Flip the is_admin flag directly in the store (there is no API for it)
async fn promote_to_admin(user_id: &str) {
    use ychat_core::traits::ProfileRepository;
    use ychat_core::Snowflake;

    let pool = ychat_db::create_pool_from_env().await.unwrap();
    let repo = ychat_db::PgProfileRepository::new(pool);
    let id: Snowflake = user_id.parse().unwrap();
    let mut profile = repo.find_by_id(id).await.unwrap().unwrap();
    profile.is_admin = true;
    repo.update(&profile).await.unwrap();
}

#[tokio::test]
async fn test_studio_denied_for_non_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server).await;

    let response = server
        .get_auth("/api/v1/studio/access", &user.access_token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["access"], "denied_not_admin");

    let response = server
        .get_auth("/api/v1/studio/users", &user.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_studio_lock_guards_delete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = register(&server).await;
    let member = register(&server).await;
    promote_to_admin(&admin.user.id).await;

    // A room with one message to moderate
    let room_req = CreateGroupRoomRequest::unique(vec![member.user.id.clone()]);
    let response = server
        .post_auth("/api/v1/rooms", &admin.access_token, &room_req)
        .await
        .unwrap();
    let room: RoomResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/messages", room.id),
            &member.access_token,
            &CreateMessageRequest::text("locked content"),
        )
        .await
        .unwrap();
    let message: TimelineMessageResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    // Lock it
    let response = server
        .put_auth(
            &format!("/api/v1/studio/messages/{}/lock", message.id),
            &admin.access_token,
            &json!({ "locked": true }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // A locked message rejects the studio delete and is left unchanged
    let response = server
        .delete_auth(
            &format!("/api/v1/studio/messages/{}", message.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/studio/rooms/{}/messages", room.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    let messages: Vec<TimelineMessageResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let still_there = messages.iter().find(|m| m.id == message.id).unwrap();
    assert!(!still_there.is_deleted);
    assert_eq!(still_there.content.as_deref(), Some("locked content"));
    assert!(still_there.is_locked);

    // Unlock, then the delete goes through
    let response = server
        .put_auth(
            &format!("/api/v1/studio/messages/{}/lock", message.id),
            &admin.access_token,
            &json!({ "locked": false }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .delete_auth(
            &format!("/api/v1/studio/messages/{}", message.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_studio_ban_and_unban() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = register(&server).await;
    let target = register(&server).await;
    promote_to_admin(&admin.user.id).await;

    // Duration code "1" = 60 seconds from creation
    let response = server
        .post_auth(
            &format!("/api/v1/studio/users/{}/ban", target.user.id),
            &admin.access_token,
            &BanUserRequest {
                duration: "1".to_string(),
                reason: Some("testing".to_string()),
            },
        )
        .await
        .unwrap();
    let ban: BanResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ban.is_active);
    let expires_at = ban.expires_at.expect("60s ban must carry an expiry");
    let expires = chrono::DateTime::parse_from_rfc3339(&expires_at).unwrap();
    let delta = expires.signed_duration_since(chrono::Utc::now());
    assert!(delta.num_seconds() > 50 && delta.num_seconds() <= 60);

    // The banned user is blocked from the chat surface
    let response = server
        .get_auth("/api/v1/rooms", &target.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Unban deactivates every active row; access returns
    let response = server
        .delete_auth(
            &format!("/api/v1/studio/users/{}/ban", target.user.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/api/v1/rooms", &target.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_studio_rename_and_reassign() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = register(&server).await;
    let member = register(&server).await;
    promote_to_admin(&admin.user.id).await;

    // Rename the member's nickname
    let response = server
        .patch_auth(
            &format!("/api/v1/studio/users/{}/nickname", member.user.id),
            &admin.access_token,
            &json!({ "nickname": "renamed" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Reassign a message from the member to the admin
    let room_req = CreateGroupRoomRequest::unique(vec![member.user.id.clone()]);
    let response = server
        .post_auth("/api/v1/rooms", &admin.access_token, &room_req)
        .await
        .unwrap();
    let room: RoomResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/messages", room.id),
            &member.access_token,
            &CreateMessageRequest::text("whose message?"),
        )
        .await
        .unwrap();
    let message: TimelineMessageResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/studio/messages/{}/author", message.id),
            &admin.access_token,
            &json!({ "user_id": admin.user.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/studio/rooms/{}/messages", room.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    let messages: Vec<TimelineMessageResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let reassigned = messages.iter().find(|m| m.id == message.id).unwrap();
    assert_eq!(reassigned.user_id, admin.user.id);
}

// ============================================================================
// Assistant Proxy Tests
// ============================================================================

#[tokio::test]
async fn test_assistant_missing_message_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Missing message: 400 with an error field, the inference backend is
    // never invoked
    let response = server.post("/api/chat", &json!({})).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"].is_string());

    // Empty message behaves the same
    let response = server
        .post("/api/chat", &json!({ "message": "" }))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"].is_string());
}
