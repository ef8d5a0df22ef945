//! PostgreSQL implementation of ReadStatusRepository
//!
//! Carries the two aggregation queries the chat client consumes as remote
//! procedures: unread message ids for one room and per-room unread counts
//! for the current user.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ychat_core::entities::ReadStatus;
use ychat_core::traits::{ReadStatusRepository, RepoResult, UnreadCount};
use ychat_core::value_objects::Snowflake;

use crate::models::{ReadStatusModel, UnreadCountModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ReadStatusRepository
#[derive(Clone)]
pub struct PgReadStatusRepository {
    pool: PgPool,
}

impl PgReadStatusRepository {
    /// Create a new PgReadStatusRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadStatusRepository for PgReadStatusRepository {
    #[instrument(skip(self, message_ids))]
    async fn find_by_messages(&self, message_ids: &[Snowflake]) -> RepoResult<Vec<ReadStatus>> {
        if message_ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = message_ids.iter().map(|s| s.into_inner()).collect();

        let results = sqlx::query_as::<_, ReadStatusModel>(
            r"
            SELECT message_id, user_id, created_at
            FROM read_statuses
            WHERE message_id = ANY($1)
            ",
        )
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReadStatus::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, message_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        // At-least-once marking: a duplicate insert for an already-read
        // message is absorbed here, not surfaced as an error.
        sqlx::query(
            r"
            INSERT INTO read_statuses (message_id, user_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (message_id, user_id) DO NOTHING
            ",
        )
        .bind(message_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unread_messages(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Snowflake>> {
        let results = sqlx::query_scalar::<_, i64>(
            r"
            SELECT m.id
            FROM messages m
            WHERE m.room_id = $1
              AND m.user_id <> $2
              AND m.is_deleted = FALSE
              AND NOT EXISTS (
                  SELECT 1 FROM read_statuses r
                  WHERE r.message_id = m.id AND r.user_id = $2
              )
            ORDER BY m.created_at ASC
            ",
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn unread_counts(&self, user_id: Snowflake) -> RepoResult<Vec<UnreadCount>> {
        let results = sqlx::query_as::<_, UnreadCountModel>(
            r"
            SELECT m.room_id, COUNT(*) AS unread_count
            FROM messages m
            INNER JOIN room_participants p
                ON p.room_id = m.room_id AND p.user_id = $1
            WHERE m.user_id <> $1
              AND m.is_deleted = FALSE
              AND NOT EXISTS (
                  SELECT 1 FROM read_statuses r
                  WHERE r.message_id = m.id AND r.user_id = $1
              )
            GROUP BY m.room_id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UnreadCount::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReadStatusRepository>();
    }
}
