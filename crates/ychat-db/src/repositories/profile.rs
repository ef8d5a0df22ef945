//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ychat_core::entities::Profile;
use ychat_core::error::DomainError;
use ychat_core::traits::{ProfileRepository, RepoResult};
use ychat_core::value_objects::Snowflake;

use crate::models::ProfileModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, username, email, nickname, avatar_public_id, is_admin, created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, username, email, nickname, avatar_public_id, is_admin, created_at, updated_at
            FROM profiles
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self, ids))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Profile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|s| s.into_inner()).collect();

        let results = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, username, email, nickname, avatar_public_id, is_admin, created_at, updated_at
            FROM profiles
            WHERE id = ANY($1)
            ",
        )
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Profile::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all_except(&self, user_id: Snowflake) -> RepoResult<Vec<Profile>> {
        let results = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, username, email, nickname, avatar_public_id, is_admin, created_at, updated_at
            FROM profiles
            WHERE id <> $1
            ORDER BY username ASC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Profile::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Profile>> {
        let results = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, username, email, nickname, avatar_public_id, is_admin, created_at, updated_at
            FROM profiles
            ORDER BY username ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Profile::from).collect())
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM profiles WHERE username = $1)
            ",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, profile, password_hash))]
    async fn create(&self, profile: &Profile, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO profiles (id, username, email, password_hash, nickname, avatar_public_id, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(profile.id.into_inner())
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(password_hash)
        .bind(&profile.nickname)
        .bind(&profile.avatar_public_id)
        .bind(profile.is_admin)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, profile))]
    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET nickname = $2, avatar_public_id = $3, is_admin = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(profile.id.into_inner())
        .bind(&profile.nickname)
        .bind(&profile.avatar_public_id)
        .bind(profile.is_admin)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(profile.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM profiles WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgProfileRepository>();
    }
}
