//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout. Usernames
//! map to synthetic email addresses internally; the persisted session is a
//! refresh token stored in Redis with auto-expiry.

use tracing::{info, instrument, warn};
use uuid::Uuid;
use ychat_cache::RefreshTokenData;
use ychat_common::auth::{hash_password, validate_password_strength, verify_password};
use ychat_core::entities::Profile;
use ychat_core::Snowflake;

use crate::dto::{
    AuthResponse, CurrentProfileResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_username(&request.username)?;
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Check if username already exists
        if self
            .ctx
            .profile_repo()
            .username_exists(&request.username)
            .await?
        {
            return Err(ServiceError::conflict("Username already registered"));
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // Create profile (synthetic email derived from the username)
        let user_id = self.ctx.generate_id();
        let profile = Profile::new(user_id, request.username);

        self.ctx.profile_repo().create(&profile, &password_hash).await?;

        info!(user_id = %user_id, "User registered successfully");

        self.issue_tokens(&profile).await
    }

    /// Login with username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // The login name is resolved through the same synthetic mapping used
        // at sign-up.
        let email = Profile::synthetic_email(&request.username);

        let profile = self
            .ctx
            .profile_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(username = %request.username, "Login failed: user not found");
                ServiceError::App(ychat_common::AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .profile_repo()
            .get_password_hash(profile.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %profile.id, "Login failed: no password hash");
                ServiceError::App(ychat_common::AppError::InvalidCredentials)
            })?;

        // Verify password
        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %profile.id, "Login failed: invalid password");
            return Err(ServiceError::App(ychat_common::AppError::InvalidCredentials));
        }

        info!(user_id = %profile.id, "User logged in successfully");

        self.issue_tokens(&profile).await
    }

    /// Refresh access token using refresh token
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        // Validate refresh token exists in Redis
        let refresh_data = self
            .ctx
            .refresh_token_store()
            .validate(&request.refresh_token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?
            .ok_or(ServiceError::App(ychat_common::AppError::InvalidToken))?;

        // Get user
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(refresh_data.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", refresh_data.user_id.to_string()))?;

        // Revoke old refresh token
        self.ctx
            .refresh_token_store()
            .revoke(&request.refresh_token)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(user_id = %profile.id, "Tokens refreshed successfully");

        self.issue_tokens(&profile).await
    }

    /// Logout user by revoking refresh token
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(
        &self,
        user_id: Snowflake,
        refresh_token: Option<String>,
    ) -> ServiceResult<()> {
        if let Some(token) = refresh_token {
            // Revoke specific refresh token
            self.ctx
                .refresh_token_store()
                .revoke(&token)
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        } else {
            // Revoke all refresh tokens for user
            self.ctx
                .refresh_token_store()
                .revoke_all_for_user(user_id)
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        }

        info!(user_id = %user_id, "User logged out successfully");
        Ok(())
    }

    /// Validate an access token and return the user ID
    #[instrument(skip(self, token))]
    pub async fn validate_token(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(token)
            .map_err(ServiceError::from)?;

        claims.user_id().map_err(ServiceError::from)
    }

    /// Generate a token pair, persist the refresh token, and build the
    /// response
    async fn issue_tokens(&self, profile: &Profile) -> ServiceResult<AuthResponse> {
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(profile.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let session_id = Uuid::new_v4().to_string();
        let refresh_data = RefreshTokenData::new(profile.id, session_id);
        self.ctx
            .refresh_token_store()
            .store(&token_pair.refresh_token, &refresh_data)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentProfileResponse::from(profile),
        ))
    }
}

/// Usernames are lowercase alphanumerics plus underscore, and become part of
/// the synthetic email address.
fn validate_username(username: &str) -> ServiceResult<()> {
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ServiceError::Domain(
            ychat_core::DomainError::InvalidUsername(
                "only letters, digits, and underscore are allowed".to_string(),
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("Alice").is_ok());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("nope@here").is_err());
    }
}
