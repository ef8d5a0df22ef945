//! System settings - singleton row holding the global kill switch

use chrono::{DateTime, Utc};

/// Fixed id of the singleton settings row
pub const SETTINGS_ROW_ID: i16 = 1;

/// Global system settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemSetting {
    /// When false, the studio is denied to everyone regardless of role
    pub studio_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl SystemSetting {
    /// Create a settings value with the given kill-switch state
    pub fn new(studio_enabled: bool) -> Self {
        Self {
            studio_enabled,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings() {
        assert!(SystemSetting::new(true).studio_enabled);
        assert!(!SystemSetting::new(false).studio_enabled);
    }
}
