//! Unread tracker service
//!
//! Maintains the mapping from room id to unread message count for the
//! current identity. Every call replaces the previous snapshot wholesale;
//! clients re-invoke it on any change notification.

use std::collections::HashMap;

use tracing::instrument;
use ychat_core::Snowflake;

use crate::dto::{ContactUnreadResponse, UnreadCountResponse, UnreadSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Unread tracker service
pub struct UnreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UnreadService<'a> {
    /// Create a new UnreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Per-room unread counts for the current identity
    #[instrument(skip(self))]
    pub async fn unread_counts(&self, user_id: Snowflake) -> ServiceResult<Vec<UnreadCountResponse>> {
        let counts = self.ctx.read_status_repo().unread_counts(user_id).await?;

        Ok(counts
            .iter()
            .map(|c| UnreadCountResponse {
                room_id: c.room_id.to_string(),
                unread_count: c.unread_count,
            })
            .collect())
    }

    /// Full unread snapshot: per-room counts plus per-contact badges for
    /// every personal room.
    ///
    /// The contact resolution walks each 1:1 room's participant rows
    /// individually to find the counterpart; the set of personal rooms per
    /// user is small enough that no batched query is used.
    #[instrument(skip(self))]
    pub async fn summary(&self, user_id: Snowflake) -> ServiceResult<UnreadSummaryResponse> {
        let counts = self.ctx.read_status_repo().unread_counts(user_id).await?;
        let counts_by_room: HashMap<Snowflake, i64> = counts
            .iter()
            .map(|c| (c.room_id, c.unread_count))
            .collect();

        let rooms = self.ctx.room_repo().find_by_participant(user_id).await?;

        let mut contacts = Vec::new();
        for room in rooms.iter().filter(|r| r.is_personal()) {
            let participants = self.ctx.participant_repo().find_by_room(room.id).await?;
            let Some(other) = participants.iter().find(|p| p.user_id != user_id) else {
                continue;
            };

            contacts.push(ContactUnreadResponse {
                user_id: other.user_id.to_string(),
                room_id: room.id.to_string(),
                unread_count: counts_by_room.get(&room.id).copied().unwrap_or(0),
            });
        }

        Ok(UnreadSummaryResponse {
            counts: counts
                .iter()
                .map(|c| UnreadCountResponse {
                    room_id: c.room_id.to_string(),
                    unread_count: c.unread_count,
                })
                .collect(),
            contacts,
        })
    }
}

#[cfg(test)]
mod tests {
    // Exercised end-to-end by the integration tests; the unread rule itself
    // is covered by the Message entity tests.
}
