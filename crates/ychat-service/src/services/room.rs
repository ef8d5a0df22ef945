//! Room service
//!
//! Handles room listing, group-room creation, personal-room resolution,
//! invitations, and leaving. Participant rows are the sole authorization
//! boundary for room access.

use serde_json::json;
use tracing::{info, instrument};
use ychat_cache::{PubSubChannel, PubSubEvent};
use ychat_core::entities::Room;
use ychat_core::Snowflake;

use crate::dto::{
    CreateGroupRoomRequest, CreatePersonalRoomRequest, InviteParticipantsRequest,
    ParticipantResponse, ProfileResponse, RoomResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Room service
pub struct RoomService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoomService<'a> {
    /// Create a new RoomService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every room the user participates in
    #[instrument(skip(self))]
    pub async fn list_rooms(&self, user_id: Snowflake) -> ServiceResult<Vec<RoomResponse>> {
        let rooms = self.ctx.room_repo().find_by_participant(user_id).await?;
        Ok(rooms.iter().map(RoomResponse::from).collect())
    }

    /// Get one room, verifying the caller is a participant
    #[instrument(skip(self))]
    pub async fn get_room(&self, room_id: Snowflake, user_id: Snowflake) -> ServiceResult<RoomResponse> {
        let room = self.require_membership(room_id, user_id).await?;
        Ok(RoomResponse::from(&room))
    }

    /// Create a group room with an initial member set
    #[instrument(skip(self, request))]
    pub async fn create_group_room(
        &self,
        user_id: Snowflake,
        request: CreateGroupRoomRequest,
    ) -> ServiceResult<RoomResponse> {
        let mut member_ids = parse_ids(&request.member_ids)?;
        member_ids.retain(|&id| id != user_id);
        if member_ids.is_empty() {
            return Err(ServiceError::validation("Select at least one member"));
        }

        let room_id = self.ctx.generate_id();
        let room = Room::new_group(room_id, request.name, user_id);
        self.ctx.room_repo().create(&room).await?;

        // Creator plus the selected members
        let mut participants = vec![user_id];
        participants.extend(member_ids);
        self.ctx
            .participant_repo()
            .add_many(room_id, &participants)
            .await?;

        info!(room_id = %room_id, members = participants.len(), "Group room created");

        self.publish_room_create(&room, &participants).await;

        Ok(RoomResponse::from(&room))
    }

    /// Open a personal 1:1 room with another user, resolving an existing
    /// pair room before creating a new one
    #[instrument(skip(self, request))]
    pub async fn open_personal_room(
        &self,
        user_id: Snowflake,
        request: CreatePersonalRoomRequest,
    ) -> ServiceResult<RoomResponse> {
        let other_id = parse_id(&request.user_id)?;

        if other_id == user_id {
            return Err(ServiceError::validation("Cannot open a room with yourself"));
        }

        let other = self
            .ctx
            .profile_repo()
            .find_by_id(other_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", other_id.to_string()))?;

        // An existing pair room wins over creating a duplicate
        if let Some(existing_id) = self
            .ctx
            .room_repo()
            .find_personal_room(user_id, other_id)
            .await?
        {
            let room = self
                .ctx
                .room_repo()
                .find_by_id(existing_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Room", existing_id.to_string()))?;
            return Ok(RoomResponse::from(&room));
        }

        let room_id = self.ctx.generate_id();
        let room = Room::new_personal(
            room_id,
            Some(other.display_name().to_string()),
            user_id,
        );
        self.ctx.room_repo().create(&room).await?;

        let participants = [user_id, other_id];
        self.ctx
            .participant_repo()
            .add_many(room_id, &participants)
            .await?;

        info!(
            room_id = %room_id,
            user_id = %user_id,
            other_id = %other_id,
            "Personal room created"
        );

        self.publish_room_create(&room, &participants).await;

        Ok(RoomResponse::from(&room))
    }

    /// List a room's participant rows
    #[instrument(skip(self))]
    pub async fn list_participants(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ParticipantResponse>> {
        self.require_membership(room_id, user_id).await?;

        let participants = self.ctx.participant_repo().find_by_room(room_id).await?;
        Ok(participants.iter().map(ParticipantResponse::from).collect())
    }

    /// Profiles that can still be invited into the room: every profile
    /// minus the current participant set
    #[instrument(skip(self))]
    pub async fn invitable_profiles(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ProfileResponse>> {
        self.require_membership(room_id, user_id).await?;

        let participants = self.ctx.participant_repo().find_by_room(room_id).await?;
        let member_ids: std::collections::HashSet<Snowflake> =
            participants.iter().map(|p| p.user_id).collect();

        let profiles = self.ctx.profile_repo().find_all_except(user_id).await?;

        Ok(profiles
            .iter()
            .filter(|p| !member_ids.contains(&p.id))
            .map(ProfileResponse::from)
            .collect())
    }

    /// Invite users into a room (one participant row per selected identity)
    #[instrument(skip(self, request))]
    pub async fn invite(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
        request: InviteParticipantsRequest,
    ) -> ServiceResult<()> {
        self.require_membership(room_id, user_id).await?;

        let invitee_ids = parse_ids(&request.user_ids)?;
        self.ctx
            .participant_repo()
            .add_many(room_id, &invitee_ids)
            .await?;

        info!(room_id = %room_id, invited = invitee_ids.len(), "Participants invited");

        let event = PubSubEvent::new(
            "PARTICIPANT_ADD",
            json!({
                "room_id": room_id.to_string(),
                "user_ids": invitee_ids.iter().map(Snowflake::to_string).collect::<Vec<_>>()
            }),
        );
        let mut channels = vec![PubSubChannel::room(room_id)];
        channels.extend(invitee_ids.iter().map(|&id| PubSubChannel::user(id)));
        self.ctx.publisher().publish_many(&channels, &event).await.ok();

        Ok(())
    }

    /// Leave a room by removing the caller's participant row
    #[instrument(skip(self))]
    pub async fn leave(&self, room_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.participant_repo().remove(room_id, user_id).await?;

        info!(room_id = %room_id, user_id = %user_id, "Left room");

        let event = PubSubEvent::new(
            "PARTICIPANT_REMOVE",
            json!({
                "room_id": room_id.to_string(),
                "user_id": user_id.to_string()
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
    async fn require_membership(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Room> {
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
            // Non-participants cannot observe that the room exists
            return Err(ServiceError::not_found("Room", room_id.to_string()));
        }

        Ok(room)
    }

    /// Announce a new room to each member's user channel
    async fn publish_room_create(&self, room: &Room, member_ids: &[Snowflake]) {
        let event = PubSubEvent::new(
            "ROOM_CREATE",
            json!({
                "id": room.id.to_string(),
                "name": room.name,
                "is_group": room.is_group
            }),
        );
        let channels: Vec<PubSubChannel> = member_ids
            .iter()
            .map(|&id| PubSubChannel::user(id))
            .collect();
        self.ctx.publisher().publish_many(&channels, &event).await.ok();
    }
}

/// Parse a Snowflake from its wire representation
pub(crate) fn parse_id(raw: &str) -> ServiceResult<Snowflake> {
    raw.parse::<i64>()
        .map(Snowflake::new)
        .map_err(|_| ServiceError::validation("Invalid id format"))
}

/// Parse a batch of Snowflakes, deduplicating while preserving order
pub(crate) fn parse_ids(raw: &[String]) -> ServiceResult<Vec<Snowflake>> {
    let mut seen = std::collections::HashSet::new();
    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        let id = parse_id(value)?;
        if seen.insert(id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), Snowflake::new(42));
        assert!(parse_id("abc").is_err());
    }

    #[test]
    fn test_parse_ids_deduplicates() {
        let raw = vec!["1".to_string(), "2".to_string(), "1".to_string()];
        let ids = parse_ids(&raw).unwrap();
        assert_eq!(ids, vec![Snowflake::new(1), Snowflake::new(2)]);
    }
}
