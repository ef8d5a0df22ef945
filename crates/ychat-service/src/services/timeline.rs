//! Room timeline service
//!
//! Materializes, for a room and the authenticated identity, the time-ordered
//! message list with resolved author profiles and read-receipt annotations.
//! Clients re-run the fetch in full on every change notification for the
//! room; there is no incremental delta path.

use std::collections::HashMap;

use serde_json::json;
use tracing::{info, instrument};
use ychat_cache::{PubSubChannel, PubSubEvent};
use ychat_core::entities::{Message, Profile, ReadStatus, Room};
use ychat_core::Snowflake;

use crate::dto::{
    CreateMessageRequest, RoomResponse, TimelineMessage, TimelineMessageResponse, TimelineResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Room timeline service
pub struct RoomTimelineService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoomTimelineService<'a> {
    /// Create a new RoomTimelineService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch the full timeline for a room and mark everything the caller
    /// has not yet seen as read.
    ///
    /// The sequence runs in full on every trigger:
    /// 1. room metadata (participant check included)
    /// 2. all messages, creation order, with their read-status rows
    /// 3. distinct author ids
    /// 4. one batched profile fetch
    /// 5. in-memory hash join of profiles onto messages
    /// 6. unread resolution + read-status inserts for the caller
    /// 7. the merged, ordered snapshot
    ///
    /// Step 6 is at-least-once; overlapping invocations for the same caller
    /// are absorbed by the store's conflict handling.
    #[instrument(skip(self))]
    pub async fn fetch(&self, room_id: Snowflake, user_id: Snowflake) -> ServiceResult<TimelineResponse> {
        let room = self.require_membership(room_id, user_id).await?;

        let messages = self.ctx.message_repo().find_by_room(room_id).await?;

        let message_ids: Vec<Snowflake> = messages.iter().map(|m| m.id).collect();
        let read_statuses = self
            .ctx
            .read_status_repo()
            .find_by_messages(&message_ids)
            .await?;

        // Distinct author set, then one batch call instead of one per message
        let mut author_ids: Vec<Snowflake> = messages.iter().map(|m| m.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors = self.ctx.profile_repo().find_by_ids(&author_ids).await?;

        // The store performs no relational join; profiles are joined onto
        // messages here, keyed by author id.
        let entries = join_authors(messages, &authors, &read_statuses);

        self.mark_unread_as_read(room_id, user_id).await?;

        Ok(TimelineResponse {
            room: RoomResponse::from(&room),
            messages: entries.into_iter().map(TimelineMessageResponse::from).collect(),
        })
    }

    /// Send a message carrying either text content or an image URL.
    ///
    /// The response is not locally appended anywhere; clients converge via
    /// the change-notification round trip.
    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
        request: CreateMessageRequest,
    ) -> ServiceResult<TimelineMessageResponse> {
        self.require_membership(room_id, user_id).await?;

        let message_id = self.ctx.generate_id();
        let message = match (request.content, request.image_url) {
            (Some(content), None) => Message::new_text(message_id, room_id, user_id, content),
            (None, Some(image_url)) => Message::new_image(message_id, room_id, user_id, image_url),
            _ => {
                return Err(ServiceError::validation(
                    "Exactly one of content / image_url is required",
                ))
            }
        };

        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message_id, room_id = %room_id, "Message created");

        let event = PubSubEvent::new(
            "MESSAGE_CREATE",
            json!({
                "id": message.id.to_string(),
                "room_id": room_id.to_string(),
                "user_id": user_id.to_string()
            }),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::room(room_id), &event)
            .await
            .ok();

        let author = self.ctx.profile_repo().find_by_id(user_id).await?;
        Ok(TimelineMessageResponse::from(TimelineMessage {
            message,
            author,
            read_by: Vec::new(),
        }))
    }

    /// Sender-side soft delete of an own message.
    ///
    /// This path deliberately does not consult `is_locked`; the lock only
    /// guards the studio's delete operation.
    #[instrument(skip(self))]
    pub async fn delete_message(
        &self,
        room_id: Snowflake,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.require_membership(room_id, user_id).await?;

        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id.to_string()))?;

        if message.room_id != room_id {
            return Err(ServiceError::not_found("Message", message_id.to_string()));
        }

        if message.user_id != user_id {
            return Err(ServiceError::Domain(
                ychat_core::DomainError::NotMessageAuthor,
            ));
        }

        self.ctx.message_repo().soft_delete(message_id).await?;

        info!(message_id = %message_id, "Message deleted by sender");

        let event = PubSubEvent::new(
            "MESSAGE_DELETE",
            json!({
                "id": message_id.to_string(),
                "room_id": room_id.to_string()
            }),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::room(room_id), &event)
            .await
            .ok();

        Ok(())
    }

    /// Resolve the caller's unread messages and insert one read-status row
    /// per message. Duplicate marks are absorbed by the store.
    async fn mark_unread_as_read(&self, room_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let unread_ids = self
            .ctx
            .read_status_repo()
            .unread_messages(room_id, user_id)
            .await?;

        if unread_ids.is_empty() {
            return Ok(());
        }

        for message_id in &unread_ids {
            self.ctx
                .read_status_repo()
                .mark_read(*message_id, user_id)
                .await?;
        }

        info!(
            room_id = %room_id,
            user_id = %user_id,
            count = unread_ids.len(),
            "Messages marked as read"
        );

        let event = PubSubEvent::new(
            "READ_STATUS_CREATE",
            json!({
                "room_id": room_id.to_string(),
                "user_id": user_id.to_string(),
                "message_ids": unread_ids.iter().map(Snowflake::to_string).collect::<Vec<_>>()
            }),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::room(room_id), &event)
            .await
            .ok();

        Ok(())
    }

    /// Fetch the room and verify the caller holds a participant row
    async fn require_membership(&self, room_id: Snowflake, user_id: Snowflake) -> ServiceResult<Room> {
        let room = self
            .ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room", room_id.to_string()))?;

        if !self
            .ctx
            .participant_repo()
            .is_participant(room_id, user_id)
            .await?
        {
            return Err(ServiceError::not_found("Room", room_id.to_string()));
        }

        Ok(room)
    }
}

/// In-memory hash join of author profiles and read-status rows onto the
/// ordered message list, keyed by author id and message id respectively.
fn join_authors(
    messages: Vec<Message>,
    authors: &[Profile],
    read_statuses: &[ReadStatus],
) -> Vec<TimelineMessage> {
    let authors_by_id: HashMap<Snowflake, &Profile> =
        authors.iter().map(|p| (p.id, p)).collect();

    let mut readers_by_message: HashMap<Snowflake, Vec<Snowflake>> = HashMap::new();
    for status in read_statuses {
        readers_by_message
            .entry(status.message_id)
            .or_default()
            .push(status.user_id);
    }

    messages
        .into_iter()
        .map(|message| {
            let author = authors_by_id.get(&message.user_id).map(|&p| p.clone());
            let read_by = readers_by_message.remove(&message.id).unwrap_or_default();
            TimelineMessage {
                message,
                author,
                read_by,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i64, username: &str) -> Profile {
        Profile::new(Snowflake::new(id), username.to_string())
    }

    fn text_message(id: i64, author: i64) -> Message {
        Message::new_text(
            Snowflake::new(id),
            Snowflake::new(500),
            Snowflake::new(author),
            format!("message {id}"),
        )
    }

    #[test]
    fn test_join_authors_resolves_profiles() {
        let messages = vec![text_message(1, 10), text_message(2, 20), text_message(3, 10)];
        let authors = vec![profile(10, "alice"), profile(20, "bob")];

        let entries = join_authors(messages, &authors, &[]);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].author.as_ref().unwrap().username, "alice");
        assert_eq!(entries[1].author.as_ref().unwrap().username, "bob");
        assert_eq!(entries[2].author.as_ref().unwrap().username, "alice");
    }

    #[test]
    fn test_join_authors_preserves_message_order() {
        let messages = vec![text_message(5, 10), text_message(6, 10), text_message(7, 10)];
        let authors = vec![profile(10, "alice")];

        let entries = join_authors(messages, &authors, &[]);
        let ids: Vec<i64> = entries
            .iter()
            .map(|e| e.message.id.into_inner())
            .collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn test_join_authors_unresolved_author_is_none() {
        let messages = vec![text_message(1, 99)];
        let entries = join_authors(messages, &[], &[]);
        assert!(entries[0].author.is_none());
    }

    #[test]
    fn test_join_authors_attaches_read_statuses() {
        let messages = vec![text_message(1, 10), text_message(2, 10)];
        let authors = vec![profile(10, "alice")];
        let statuses = vec![
            ReadStatus::new(Snowflake::new(1), Snowflake::new(20)),
            ReadStatus::new(Snowflake::new(1), Snowflake::new(30)),
        ];

        let entries = join_authors(messages, &authors, &statuses);

        assert_eq!(entries[0].read_by, vec![Snowflake::new(20), Snowflake::new(30)]);
        assert!(entries[1].read_by.is_empty());
    }
}
