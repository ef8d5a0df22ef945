//! System settings database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use ychat_core::SystemSetting;

/// Database model for the singleton system_settings row
#[derive(Debug, Clone, FromRow)]
pub struct SystemSettingModel {
    pub studio_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<SystemSettingModel> for SystemSetting {
    fn from(model: SystemSettingModel) -> Self {
        SystemSetting {
            studio_enabled: model.studio_enabled,
            updated_at: model.updated_at,
        }
    }
}
