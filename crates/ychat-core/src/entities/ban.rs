//! User ban entity and duration codes
//!
//! Ban rows are append-only: banning inserts a row, unbanning flips
//! `is_active` to false. A user may accumulate any number of rows; only
//! rows that are active and not yet expired suppress access.

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::Snowflake;

/// Ban record for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBan {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub banned_by: Snowflake,
    pub reason: Option<String>,
    /// None = permanent ban
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserBan {
    /// Create a new active ban
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        banned_by: Snowflake,
        reason: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            banned_by,
            reason,
            expires_at,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// A ban is effective iff it is active and either permanent or not yet
    /// expired at `now`.
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.is_none_or(|expires| expires > now)
    }

    /// Effectiveness against the current wall clock
    pub fn is_effective(&self) -> bool {
        self.is_effective_at(Utc::now())
    }

    /// Check if this ban never expires
    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }

    /// Deactivate this ban (unban)
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Ban duration presets selectable from the studio, keyed by the single-digit
/// codes the console prompts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanDuration {
    Minute,
    FiveMinutes,
    Hour,
    Day,
    Year,
    Permanent,
}

impl BanDuration {
    /// Parse a duration code ("1" through "6")
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Minute),
            "2" => Some(Self::FiveMinutes),
            "3" => Some(Self::Hour),
            "4" => Some(Self::Day),
            "5" => Some(Self::Year),
            "6" => Some(Self::Permanent),
            _ => None,
        }
    }

    /// Expiry instant for a ban created at `now`; None for permanent bans
    pub fn expires_from(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Minute => Some(now + Duration::seconds(60)),
            Self::FiveMinutes => Some(now + Duration::minutes(5)),
            Self::Hour => Some(now + Duration::hours(1)),
            Self::Day => Some(now + Duration::days(1)),
            Self::Year => Some(now + Duration::days(365)),
            Self::Permanent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ban_with_expiry(expires_at: Option<DateTime<Utc>>, is_active: bool) -> UserBan {
        let mut ban = UserBan::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            None,
            expires_at,
        );
        ban.is_active = is_active;
        ban
    }

    #[test]
    fn test_permanent_active_ban_is_effective() {
        let ban = ban_with_expiry(None, true);
        assert!(ban.is_permanent());
        assert!(ban.is_effective());
    }

    #[test]
    fn test_expired_ban_is_not_effective() {
        let now = Utc::now();
        let ban = ban_with_expiry(Some(now - Duration::seconds(1)), true);
        assert!(!ban.is_effective_at(now));
    }

    #[test]
    fn test_inactive_ban_is_not_effective() {
        let ban = ban_with_expiry(None, false);
        assert!(!ban.is_effective());
    }

    #[test]
    fn test_future_expiry_is_effective_until_the_instant_passes() {
        let now = Utc::now();
        let ban = ban_with_expiry(Some(now + Duration::seconds(60)), true);
        assert!(ban.is_effective_at(now));
        // Once the instant elapses the same row reads as not banned, with no
        // unban mutation required.
        assert!(!ban.is_effective_at(now + Duration::seconds(61)));
    }

    #[test]
    fn test_deactivate() {
        let mut ban = ban_with_expiry(None, true);
        ban.deactivate();
        assert!(!ban.is_effective());
    }

    #[test]
    fn test_duration_codes() {
        let now = Utc::now();
        assert_eq!(
            BanDuration::from_code("1").unwrap().expires_from(now),
            Some(now + Duration::seconds(60))
        );
        assert_eq!(
            BanDuration::from_code("2").unwrap().expires_from(now),
            Some(now + Duration::minutes(5))
        );
        assert_eq!(BanDuration::from_code("6").unwrap().expires_from(now), None);
        assert!(BanDuration::from_code("7").is_none());
        assert!(BanDuration::from_code("").is_none());
    }
}
