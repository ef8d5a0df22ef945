//! PostgreSQL implementation of SettingsRepository
//!
//! The settings table holds a single row (id = 1) with the studio kill
//! switch. A missing row surfaces as an error so access decisions fail
//! closed.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ychat_core::entities::SystemSetting;
use ychat_core::error::DomainError;
use ychat_core::traits::{RepoResult, SettingsRepository};

use crate::models::SystemSettingModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SettingsRepository
#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create a new PgSettingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    #[instrument(skip(self))]
    async fn get(&self) -> RepoResult<SystemSetting> {
        let result = sqlx::query_as::<_, SystemSettingModel>(
            r"
            SELECT studio_enabled, updated_at
            FROM system_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(SystemSetting::from)
            .ok_or_else(|| DomainError::DatabaseError("system_settings row missing".to_string()))
    }

    #[instrument(skip(self))]
    async fn set_studio_enabled(&self, enabled: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE system_settings
            SET studio_enabled = $1, updated_at = NOW()
            WHERE id = 1
            ",
        )
        .bind(enabled)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DatabaseError(
                "system_settings row missing".to_string(),
            ));
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
        assert_send_sync::<PgSettingsRepository>();
    }
}
