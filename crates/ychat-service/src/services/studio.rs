//! Studio (moderation console) service
//!
//! Administrative mutations over messages and users, each gated by the
//! access guard. Ban state in the user listing is recomputed from all ban
//! rows on every call, never cached.

use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument, warn};
use ychat_cache::{PubSubChannel, PubSubEvent};
use ychat_core::entities::{BanDuration, UserBan};
use ychat_core::Snowflake;

use crate::dto::{
    BanResponse, BanUserRequest, ProfileWithBanState, ReassignMessageRequest,
    RenameNicknameRequest, RoomSummaryResponse, RoomWithCount, SetMessageLockRequest,
    SystemSettingResponse, TimelineMessage, TimelineMessageResponse, UpdateMessageRequest,
    UserModerationResponse,
};
use crate::services::room::parse_id;

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Studio service
pub struct StudioService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StudioService<'a> {
    /// Create a new StudioService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All rooms with their message counts, newest first
    #[instrument(skip(self))]
    pub async fn list_rooms(&self, actor: Snowflake) -> ServiceResult<Vec<RoomSummaryResponse>> {
        self.require_studio(actor).await?;

        let rooms = self.ctx.room_repo().find_all().await?;

        let mut summaries = Vec::with_capacity(rooms.len());
        for room in rooms {
            let message_count = self.ctx.message_repo().count_by_room(room.id).await?;
            summaries.push(RoomSummaryResponse::from(RoomWithCount {
                room,
                message_count,
            }));
        }

        Ok(summaries)
    }

    /// All messages of one room with resolved authors, for moderation view
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        actor: Snowflake,
        room_id: Snowflake,
    ) -> ServiceResult<Vec<TimelineMessageResponse>> {
        self.require_studio(actor).await?;

        let messages = self.ctx.message_repo().find_by_room(room_id).await?;

        let mut author_ids: Vec<Snowflake> = messages.iter().map(|m| m.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self.ctx.profile_repo().find_by_ids(&author_ids).await?;

        let responses = messages
            .into_iter()
            .map(|message| {
                let author = authors.iter().find(|p| p.id == message.user_id).cloned();
                TimelineMessageResponse::from(TimelineMessage {
                    message,
                    author,
                    read_by: Vec::new(),
                })
            })
            .collect();

        Ok(responses)
    }

    /// All users with their ban state, computed fresh from every active
    /// ban row
    #[instrument(skip(self))]
    pub async fn list_users(&self, actor: Snowflake) -> ServiceResult<Vec<UserModerationResponse>> {
        self.require_studio(actor).await?;

        let profiles = self.ctx.profile_repo().find_all().await?;
        let active_bans = self.ctx.ban_repo().find_all_active().await?;
        let now = Utc::now();

        Ok(profiles
            .into_iter()
            .map(|profile| {
                let is_banned = active_bans
                    .iter()
                    .any(|ban| ban.user_id == profile.id && ban.is_effective_at(now));
                UserModerationResponse::from(ProfileWithBanState { profile, is_banned })
            })
            .collect())
    }

    /// Edit a message's content
    #[instrument(skip(self, request))]
    pub async fn edit_message(
        &self,
        actor: Snowflake,
        message_id: Snowflake,
        request: UpdateMessageRequest,
    ) -> ServiceResult<()> {
        self.require_studio(actor).await?;

        let message = self.find_message(message_id).await?;
        self.ctx
            .message_repo()
            .update_content(message_id, &request.content)
            .await?;

        info!(message_id = %message_id, actor = %actor, "Message edited");

        self.publish_room_event(
            message.room_id,
            "MESSAGE_UPDATE",
            json!({
                "id": message_id.to_string(),
                "room_id": message.room_id.to_string()
            }),
        )
        .await;

        Ok(())
    }

    /// Soft-delete a message; rejected while the row is locked
    #[instrument(skip(self))]
    pub async fn delete_message(&self, actor: Snowflake, message_id: Snowflake) -> ServiceResult<()> {
        self.require_studio(actor).await?;

        let message = self.find_message(message_id).await?;
        self.ctx.message_repo().soft_delete_unlocked(message_id).await?;

        info!(message_id = %message_id, actor = %actor, "Message deleted");

        self.publish_room_event(
            message.room_id,
            "MESSAGE_DELETE",
            json!({
                "id": message_id.to_string(),
                "room_id": message.room_id.to_string()
            }),
        )
        .await;

        Ok(())
    }

    /// Lock or unlock a message against deletion
    #[instrument(skip(self, request))]
    pub async fn set_message_lock(
        &self,
        actor: Snowflake,
        message_id: Snowflake,
        request: SetMessageLockRequest,
    ) -> ServiceResult<()> {
        self.require_studio(actor).await?;

        let message = self.find_message(message_id).await?;
        self.ctx
            .message_repo()
            .set_locked(message_id, request.locked)
            .await?;

        info!(message_id = %message_id, locked = request.locked, "Message lock toggled");

        self.publish_room_event(
            message.room_id,
            "MESSAGE_UPDATE",
            json!({
                "id": message_id.to_string(),
                "room_id": message.room_id.to_string(),
                "is_locked": request.locked
            }),
        )
        .await;

        Ok(())
    }

    /// Reassign a message to a different author
    #[instrument(skip(self, request))]
    pub async fn reassign_message(
        &self,
        actor: Snowflake,
        message_id: Snowflake,
        request: ReassignMessageRequest,
    ) -> ServiceResult<()> {
        self.require_studio(actor).await?;

        let new_author = parse_id(&request.user_id)?;

        // The new author must resolve to a real profile
        self.ctx
            .profile_repo()
            .find_by_id(new_author)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", new_author.to_string()))?;

        let message = self.find_message(message_id).await?;
        self.ctx
            .message_repo()
            .reassign_author(message_id, new_author)
            .await?;

        info!(
            message_id = %message_id,
            new_author = %new_author,
            "Message author reassigned"
        );

        self.publish_room_event(
            message.room_id,
            "MESSAGE_UPDATE",
            json!({
                "id": message_id.to_string(),
                "room_id": message.room_id.to_string(),
                "user_id": new_author.to_string()
            }),
        )
        .await;

        Ok(())
    }

    /// Rename a user's nickname
    #[instrument(skip(self, request))]
    pub async fn rename_nickname(
        &self,
        actor: Snowflake,
        user_id: Snowflake,
        request: RenameNicknameRequest,
    ) -> ServiceResult<()> {
        self.require_studio(actor).await?;

        let mut profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let nickname = if request.nickname.is_empty() {
            None
        } else {
            Some(request.nickname)
        };
        profile.set_nickname(nickname);
        self.ctx.profile_repo().update(&profile).await?;

        info!(user_id = %user_id, actor = %actor, "Nickname renamed");

        let event = PubSubEvent::new(
            "PROFILE_UPDATE",
            json!({ "user_id": user_id.to_string() }),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::broadcast(), &event)
            .await
            .ok();

        Ok(())
    }

    /// Ban a user for one of the preset durations
    #[instrument(skip(self, request))]
    pub async fn ban_user(
        &self,
        actor: Snowflake,
        user_id: Snowflake,
        request: BanUserRequest,
    ) -> ServiceResult<BanResponse> {
        self.require_studio(actor).await?;

        let duration = BanDuration::from_code(&request.duration)
            .ok_or_else(|| ServiceError::validation("Unknown ban duration code"))?;

        // The target must exist
        self.ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let now = Utc::now();
        let ban = UserBan::new(
            self.ctx.generate_id(),
            user_id,
            actor,
            request.reason,
            duration.expires_from(now),
        );
        self.ctx.ban_repo().create(&ban).await?;

        warn!(
            user_id = %user_id,
            actor = %actor,
            permanent = ban.is_permanent(),
            "User banned"
        );

        let event = PubSubEvent::new(
            "BAN_CREATE",
            json!({
                "user_id": user_id.to_string(),
                "expires_at": ban.expires_at
            }),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::user(user_id), &event)
            .await
            .ok();

        Ok(BanResponse::from(&ban))
    }

    /// Unban a user by deactivating every active ban row
    #[instrument(skip(self))]
    pub async fn unban_user(&self, actor: Snowflake, user_id: Snowflake) -> ServiceResult<u64> {
        self.require_studio(actor).await?;

        let deactivated = self.ctx.ban_repo().deactivate_for_user(user_id).await?;

        info!(user_id = %user_id, actor = %actor, deactivated, "User unbanned");

        let event = PubSubEvent::new(
            "BAN_DELETE",
            json!({ "user_id": user_id.to_string() }),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::user(user_id), &event)
            .await
            .ok();

        Ok(deactivated)
    }

    /// Read the current kill-switch state
    #[instrument(skip(self))]
    pub async fn get_settings(&self, actor: Snowflake) -> ServiceResult<SystemSettingResponse> {
        self.require_studio(actor).await?;
        let settings = self.ctx.settings_repo().get().await?;
        Ok(SystemSettingResponse::from(settings))
    }

    /// Emergency stop: flip the kill switch off.
    ///
    /// Re-enabling is a manual operation against the store, matching the
    /// one-way console.
    #[instrument(skip(self))]
    pub async fn emergency_stop(&self, actor: Snowflake) -> ServiceResult<()> {
        self.require_studio(actor).await?;

        self.ctx.settings_repo().set_studio_enabled(false).await?;

        warn!(actor = %actor, "Emergency stop engaged; studio disabled");

        let event = PubSubEvent::new("STUDIO_DISABLED", json!({}));
        self.ctx
            .publisher()
            .publish(&PubSubChannel::broadcast(), &event)
            .await
            .ok();

        Ok(())
    }

    async fn require_studio(&self, actor: Snowflake) -> ServiceResult<()> {
        AccessService::new(self.ctx).require_studio(actor).await
    }

    async fn find_message(&self, message_id: Snowflake) -> ServiceResult<ychat_core::Message> {
        self.ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id.to_string()))
    }

    async fn publish_room_event(&self, room_id: Snowflake, event_type: &str, data: serde_json::Value) {
        let event = PubSubEvent::new(event_type, data);
        self.ctx
            .publisher()
            .publish(&PubSubChannel::room(room_id), &event)
            .await
            .ok();
    }
}

#[cfg(test)]
mod tests {
    // Gate ordering and ban effectiveness are covered by the access-service
    // and entity tests; the mutations are exercised end-to-end by the
    // integration tests.
}
