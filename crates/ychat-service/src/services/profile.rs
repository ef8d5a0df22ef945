//! Profile service
//!
//! Handles profile reads and owner-side updates (nickname, avatar).

use tracing::{info, instrument};
use ychat_core::Snowflake;

use crate::dto::{CurrentProfileResponse, ProfileResponse, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a user's public profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(ProfileResponse::from(&profile))
    }

    /// Get the current authenticated user's full profile
    #[instrument(skip(self))]
    pub async fn get_current_profile(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<CurrentProfileResponse> {
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentProfileResponse::from(&profile))
    }

    /// List every other profile, ordered by username (the contact list)
    #[instrument(skip(self))]
    pub async fn list_contacts(&self, user_id: Snowflake) -> ServiceResult<Vec<ProfileResponse>> {
        let profiles = self.ctx.profile_repo().find_all_except(user_id).await?;
        Ok(profiles.iter().map(ProfileResponse::from).collect())
    }

    /// Update own nickname and/or avatar; username is immutable
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentProfileResponse> {
        let mut profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if let Some(nickname) = request.nickname {
            let nickname = if nickname.is_empty() { None } else { Some(nickname) };
            profile.set_nickname(nickname);
        }

        if let Some(public_id) = request.avatar_public_id {
            let public_id = if public_id.is_empty() { None } else { Some(public_id) };
            profile.set_avatar(public_id);
        }

        self.ctx.profile_repo().update(&profile).await?;
        info!(user_id = %user_id, "Profile updated");

        Ok(CurrentProfileResponse::from(&profile))
    }
}

#[cfg(test)]
mod tests {
    // Exercised end-to-end by the integration tests.
}
