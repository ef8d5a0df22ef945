//! Access guard service
//!
//! Two independent gates decide who may reach the studio: the global kill
//! switch, then the per-user admin flag. Both fail closed: any read error
//! denies. Separately, effective-ban evaluation decides whether an identity
//! may use the chat surface at all. Nothing here is cached; every decision
//! reads fresh state.

use chrono::Utc;
use tracing::{instrument, warn};
use ychat_core::entities::UserBan;
use ychat_core::{DomainError, Snowflake};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Outcome of the studio access decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioAccess {
    /// Kill switch is off (or unreadable): nobody enters, the admin gate
    /// is never evaluated
    DeniedKillSwitch,
    /// Kill switch is on but the identity is not an administrator
    /// (or the profile read failed)
    DeniedNotAdmin,
    /// Both gates passed
    Granted,
}

impl StudioAccess {
    /// Combine the two gate readings, in order, failing closed.
    ///
    /// `studio_enabled` / `is_admin` are None when the corresponding read
    /// failed. A dead kill switch short-circuits: the admin reading is
    /// irrelevant then.
    pub fn evaluate(studio_enabled: Option<bool>, is_admin: Option<bool>) -> Self {
        match studio_enabled {
            Some(true) => match is_admin {
                Some(true) => Self::Granted,
                _ => Self::DeniedNotAdmin,
            },
            _ => Self::DeniedKillSwitch,
        }
    }
}

/// Access guard service
pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    /// Create a new AccessService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run both studio gates for an identity.
    ///
    /// Gate 1 reads the kill switch; a failed read or a disabled switch
    /// denies immediately without touching gate 2. Gate 2 reads the admin
    /// flag; a failed read denies.
    #[instrument(skip(self))]
    pub async fn check_studio_access(&self, user_id: Snowflake) -> StudioAccess {
        let studio_enabled = match self.ctx.settings_repo().get().await {
            Ok(settings) => Some(settings.studio_enabled),
            Err(e) => {
                warn!(error = %e, "Kill-switch read failed; denying studio access");
                None
            }
        };

        if studio_enabled != Some(true) {
            return StudioAccess::DeniedKillSwitch;
        }

        let is_admin = match self.ctx.profile_repo().find_by_id(user_id).await {
            Ok(Some(profile)) => Some(profile.is_admin),
            Ok(None) => Some(false),
            Err(e) => {
                warn!(error = %e, user_id = %user_id, "Admin read failed; denying studio access");
                None
            }
        };

        StudioAccess::evaluate(studio_enabled, is_admin)
    }

    /// Require studio access, mapping denial to the matching domain error
    #[instrument(skip(self))]
    pub async fn require_studio(&self, user_id: Snowflake) -> ServiceResult<()> {
        match self.check_studio_access(user_id).await {
            StudioAccess::Granted => Ok(()),
            StudioAccess::DeniedKillSwitch => Err(ServiceError::Domain(DomainError::StudioDisabled)),
            StudioAccess::DeniedNotAdmin => Err(ServiceError::Domain(DomainError::NotAdmin)),
        }
    }

    /// The currently effective ban for an identity, if any.
    ///
    /// All active rows are fetched and the effectiveness rule is applied in
    /// memory against the current instant; rows that merely expired need no
    /// unban mutation to stop counting. Read errors propagate so the caller
    /// surfaces them instead of silently allowing or denying.
    #[instrument(skip(self))]
    pub async fn effective_ban(&self, user_id: Snowflake) -> ServiceResult<Option<UserBan>> {
        let bans = self.ctx.ban_repo().find_active_by_user(user_id).await?;
        let now = Utc::now();

        Ok(bans.into_iter().find(|ban| ban.is_effective_at(now)))
    }

    /// Require that the identity is not under an effective ban
    #[instrument(skip(self))]
    pub async fn require_not_banned(&self, user_id: Snowflake) -> ServiceResult<()> {
        match self.effective_ban(user_id).await? {
            Some(_) => Err(ServiceError::Domain(DomainError::UserBanned)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_gates_pass() {
        assert_eq!(
            StudioAccess::evaluate(Some(true), Some(true)),
            StudioAccess::Granted
        );
    }

    #[test]
    fn test_kill_switch_denies_before_admin_gate() {
        // An admin is still denied while the switch is off
        assert_eq!(
            StudioAccess::evaluate(Some(false), Some(true)),
            StudioAccess::DeniedKillSwitch
        );
    }

    #[test]
    fn test_kill_switch_read_failure_fails_closed() {
        assert_eq!(
            StudioAccess::evaluate(None, Some(true)),
            StudioAccess::DeniedKillSwitch
        );
    }

    #[test]
    fn test_non_admin_denied() {
        assert_eq!(
            StudioAccess::evaluate(Some(true), Some(false)),
            StudioAccess::DeniedNotAdmin
        );
    }

    #[test]
    fn test_admin_read_failure_fails_closed() {
        assert_eq!(
            StudioAccess::evaluate(Some(true), None),
            StudioAccess::DeniedNotAdmin
        );
    }
}
