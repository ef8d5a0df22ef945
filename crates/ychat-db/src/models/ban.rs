//! Ban database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use ychat_core::{Snowflake, UserBan};

/// Database model for the user_bans table
#[derive(Debug, Clone, FromRow)]
pub struct BanModel {
    pub id: i64,
    pub user_id: i64,
    pub banned_by: i64,
    pub reason: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BanModel> for UserBan {
    fn from(model: BanModel) -> Self {
        UserBan {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            banned_by: Snowflake::new(model.banned_by),
            reason: model.reason,
            expires_at: model.expires_at,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
