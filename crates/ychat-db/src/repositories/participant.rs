//! PostgreSQL implementation of ParticipantRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ychat_core::entities::RoomParticipant;
use ychat_core::error::DomainError;
use ychat_core::traits::{ParticipantRepository, RepoResult};
use ychat_core::value_objects::Snowflake;

use crate::models::ParticipantModel;

use super::error::{map_db_error, map_unique_violation, participant_not_found};

/// PostgreSQL implementation of ParticipantRepository
#[derive(Clone)]
pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    /// Create a new PgParticipantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    #[instrument(skip(self))]
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<RoomParticipant>> {
        let results = sqlx::query_as::<_, ParticipantModel>(
            r"
            SELECT room_id, user_id, joined_at
            FROM room_participants
            WHERE room_id = $1
            ORDER BY joined_at ASC
            ",
        )
        .bind(room_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(RoomParticipant::from).collect())
    }

    #[instrument(skip(self))]
    async fn is_participant(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM room_participants WHERE room_id = $1 AND user_id = $2)
            ",
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, participant))]
    async fn add(&self, participant: &RoomParticipant) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO room_participants (room_id, user_id, joined_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(participant.room_id.into_inner())
        .bind(participant.user_id.into_inner())
        .bind(participant.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyParticipant))?;

        Ok(())
    }

    #[instrument(skip(self, user_ids))]
    async fn add_many(&self, room_id: Snowflake, user_ids: &[Snowflake]) -> RepoResult<()> {
        if user_ids.is_empty() {
            return Ok(());
        }

        let raw_ids: Vec<i64> = user_ids.iter().map(|s| s.into_inner()).collect();

        sqlx::query(
            r"
            INSERT INTO room_participants (room_id, user_id, joined_at)
            SELECT $1, unnest($2::BIGINT[]), NOW()
            ON CONFLICT (room_id, user_id) DO NOTHING
            ",
        )
        .bind(room_id.into_inner())
        .bind(&raw_ids)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM room_participants WHERE room_id = $1 AND user_id = $2
            ",
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(participant_not_found());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgParticipantRepository>();
    }
}
