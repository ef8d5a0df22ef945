//! PostgreSQL implementation of BanRepository
//!
//! Ban rows are append-only. Unbanning deactivates rows in place; nothing
//! is physically deleted, so the studio can always recompute ban state from
//! the full history.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ychat_core::entities::UserBan;
use ychat_core::traits::{BanRepository, RepoResult};
use ychat_core::value_objects::Snowflake;

use crate::models::BanModel;

use super::error::map_db_error;

/// PostgreSQL implementation of BanRepository
#[derive(Clone)]
pub struct PgBanRepository {
    pool: PgPool,
}

impl PgBanRepository {
    /// Create a new PgBanRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BanRepository for PgBanRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<UserBan>> {
        let results = sqlx::query_as::<_, BanModel>(
            r"
            SELECT id, user_id, banned_by, reason, expires_at, is_active, created_at, updated_at
            FROM user_bans
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserBan::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_active_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<UserBan>> {
        let results = sqlx::query_as::<_, BanModel>(
            r"
            SELECT id, user_id, banned_by, reason, expires_at, is_active, created_at, updated_at
            FROM user_bans
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserBan::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all_active(&self) -> RepoResult<Vec<UserBan>> {
        let results = sqlx::query_as::<_, BanModel>(
            r"
            SELECT id, user_id, banned_by, reason, expires_at, is_active, created_at, updated_at
            FROM user_bans
            WHERE is_active = TRUE
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserBan::from).collect())
    }

    #[instrument(skip(self, ban))]
    async fn create(&self, ban: &UserBan) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_bans (id, user_id, banned_by, reason, expires_at, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(ban.id.into_inner())
        .bind(ban.user_id.into_inner())
        .bind(ban.banned_by.into_inner())
        .bind(&ban.reason)
        .bind(ban.expires_at)
        .bind(ban.is_active)
        .bind(ban.created_at)
        .bind(ban.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn deactivate_for_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE user_bans
            SET is_active = FALSE, updated_at = NOW()
            WHERE user_id = $1 AND is_active = TRUE
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgBanRepository>();
    }
}
