//! PostgreSQL implementation of RoomRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ychat_core::entities::Room;
use ychat_core::traits::{RepoResult, RoomRepository};
use ychat_core::value_objects::Snowflake;

use crate::models::RoomModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RoomRepository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new PgRoomRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>> {
        let result = sqlx::query_as::<_, RoomModel>(
            r"
            SELECT id, name, is_group, created_by, created_at
            FROM rooms
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Room::from))
    }

    #[instrument(skip(self))]
    async fn find_by_participant(&self, user_id: Snowflake) -> RepoResult<Vec<Room>> {
        let results = sqlx::query_as::<_, RoomModel>(
            r"
            SELECT r.id, r.name, r.is_group, r.created_by, r.created_at
            FROM rooms r
            INNER JOIN room_participants p ON p.room_id = r.id
            WHERE p.user_id = $1
            ORDER BY r.created_at ASC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Room::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Room>> {
        let results = sqlx::query_as::<_, RoomModel>(
            r"
            SELECT id, name, is_group, created_by, created_at
            FROM rooms
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Room::from).collect())
    }

    #[instrument(skip(self, room))]
    async fn create(&self, room: &Room) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO rooms (id, name, is_group, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(room.id.into_inner())
        .bind(&room.name)
        .bind(room.is_group)
        .bind(room.created_by.into_inner())
        .bind(room.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_personal_room(
        &self,
        user_id: Snowflake,
        other_user_id: Snowflake,
    ) -> RepoResult<Option<Snowflake>> {
        // A personal room is a non-group room whose participant set is
        // exactly this pair.
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT r.id
            FROM rooms r
            WHERE r.is_group = FALSE
              AND EXISTS (SELECT 1 FROM room_participants WHERE room_id = r.id AND user_id = $1)
              AND EXISTS (SELECT 1 FROM room_participants WHERE room_id = r.id AND user_id = $2)
              AND (SELECT COUNT(*) FROM room_participants WHERE room_id = r.id) = 2
            LIMIT 1
            ",
        )
        .bind(user_id.into_inner())
        .bind(other_user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Snowflake::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRoomRepository>();
    }
}
