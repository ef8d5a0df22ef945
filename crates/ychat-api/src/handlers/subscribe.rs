//! Realtime subscription handlers
//!
//! WebSocket endpoints relaying change notifications. The room feed covers
//! one room's mutations; the event feed covers everything relevant to the
//! current user (their rooms, their user channel, and broadcasts) and
//! drives unread re-fetches.
//!
//! Each connection owns its relay loop: closing the socket tears down the
//! loop together with its 60-second ban recheck, so no callback outlives
//! the subscription. Clients respond to any relayed event by re-running
//! their fetch in full.

use std::collections::HashSet;
use std::time::Duration;

use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use ychat_cache::{PubSubChannel, ReceivedMessage};
use ychat_core::Snowflake;
use ychat_service::{AccessService, RoomService};

use crate::extractors::ActiveUser;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

use super::parse_snowflake;

/// Close code sent when the ban recheck trips mid-connection
const CLOSE_BANNED: u16 = 4403;

/// Interval for the ban recheck, independent of change notifications
const BAN_RECHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Subscribe to one room's change notifications
///
/// GET /rooms/{room_id}/subscribe
pub async fn subscribe_room(
    State(state): State<AppState>,
    user: ActiveUser,
    Path(room_id): Path<String>,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let room_id = parse_snowflake(&room_id, "room_id")?;

    // Membership gate, same as any other room read
    RoomService::new(state.service_context())
        .get_room(room_id, user.user_id)
        .await?;

    let channels = vec![PubSubChannel::room(room_id)];
    state
        .subscriber()
        .subscribe(&channels)
        .await
        .map_err(ApiError::internal)?;

    let watched: HashSet<PubSubChannel> = channels.into_iter().collect();
    Ok(ws.on_upgrade(move |socket| relay(socket, state, watched, user.user_id)))
}

/// Subscribe to every change notification relevant to the current user:
/// all their rooms, their user channel, and broadcasts
///
/// GET /subscribe
pub async fn subscribe_events(
    State(state): State<AppState>,
    user: ActiveUser,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let rooms = RoomService::new(state.service_context())
        .list_rooms(user.user_id)
        .await?;

    let mut channels = vec![
        PubSubChannel::user(user.user_id),
        PubSubChannel::broadcast(),
    ];
    for room in &rooms {
        let room_id = parse_snowflake(&room.id, "room_id")?;
        channels.push(PubSubChannel::room(room_id));
    }

    state
        .subscriber()
        .subscribe(&channels)
        .await
        .map_err(ApiError::internal)?;

    let watched: HashSet<PubSubChannel> = channels.into_iter().collect();
    Ok(ws.on_upgrade(move |socket| relay(socket, state, watched, user.user_id)))
}

/// Relay loop: forward watched events to the socket, recheck the ban state
/// on a fixed interval, and stop on client disconnect. Returning drops the
/// broadcast receiver and the interval with it.
async fn relay(
    socket: WebSocket,
    state: AppState,
    watched: HashSet<PubSubChannel>,
    user_id: Snowflake,
) {
    let mut rx = state.subscriber().receiver();
    let (mut sender, mut receiver) = socket.split();

    let mut ban_check = tokio::time::interval(BAN_RECHECK_INTERVAL);
    // The entry gate already ran; consume the interval's immediate tick
    ban_check.tick().await;

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Ok(ReceivedMessage { channel, payload, .. }) if watched.contains(&channel) => {
                        if sender.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        // Clients re-fetch in full on every event, so a gap
                        // only delays convergence until the next one
                        warn!(skipped, "Subscription receiver lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            _ = ban_check.tick() => {
                let ban = AccessService::new(state.service_context())
                    .effective_ban(user_id)
                    .await;
                if matches!(ban, Ok(Some(_))) {
                    let _ = sender
                        .send(Message::Close(Some(CloseFrame {
                            code: CLOSE_BANNED,
                            reason: "account suspended".into(),
                        })))
                        .await;
                    break;
                }
            }

            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // inbound chatter is ignored
                    Some(Err(_)) => break,
                }
            }
        }
    }

    debug!(user_id = %user_id, "Subscription closed");
}
