use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::modules::auth::application::domain::entities::StoredToken;
use crate::modules::auth::application::ports::incoming::use_cases::{
    PasswordResetError, RequestPasswordResetCommand, RequestPasswordResetUseCase,
    ResetPasswordCommand, ResetPasswordUseCase, ResetTokenStatus, VerifyResetTokenUseCase,
};
use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, PasswordResetNotifier, PasswordResetTokenRepository, TokenClaims,
    TokenProvider, TokenType, UserRepository,
};

use super::token_hasher::hash_token;

/// Request, verify and consume password reset links.
#[derive(Clone)]
pub struct PasswordResetService {
    users: Arc<dyn UserRepository + Send + Sync>,
    reset_tokens: Arc<dyn PasswordResetTokenRepository + Send + Sync>,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    notifier: Arc<dyn PasswordResetNotifier + Send + Sync>,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        reset_tokens: Arc<dyn PasswordResetTokenRepository + Send + Sync>,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
        hasher: Arc<dyn PasswordHasher + Send + Sync>,
        notifier: Arc<dyn PasswordResetNotifier + Send + Sync>,
    ) -> Self {
        Self {
            users,
            reset_tokens,
            tokens,
            hasher,
            notifier,
        }
    }

    fn repo_err(e: impl std::fmt::Display) -> PasswordResetError {
        PasswordResetError::RepositoryError(e.to_string())
    }

    /// Signature, type, record, usage and expiry checks shared by verify and reset.
    async fn check_token(
        &self,
        token: &str,
    ) -> Result<(TokenClaims, StoredToken), PasswordResetError> {
        let claims = self
            .tokens
            .verify_token_of_type(token, TokenType::PasswordReset)
            .map_err(|_| PasswordResetError::InvalidToken)?;

        let stored = self
            .reset_tokens
            .find_by_hash(&hash_token(token))
            .await
            .map_err(Self::repo_err)?
            .ok_or(PasswordResetError::InvalidToken)?;

        if stored.used || stored.is_expired() || stored.user_id != claims.sub {
            return Err(PasswordResetError::InvalidToken);
        }

        Ok((claims, stored))
    }
}

#[async_trait]
impl RequestPasswordResetUseCase for PasswordResetService {
    async fn execute(
        &self,
        command: RequestPasswordResetCommand,
    ) -> Result<(), PasswordResetError> {
        let Some(user) = self
            .users
            .find_by_email(command.email())
            .await
            .map_err(Self::repo_err)?
        else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };

        let issued = self
            .tokens
            .generate_reset_token(user.id, user.role)
            .map_err(|e| PasswordResetError::TokenGenerationFailed(e.to_string()))?;

        self.reset_tokens
            .store(user.id, hash_token(&issued.token), issued.expires_at)
            .await
            .map_err(Self::repo_err)?;

        let link = format!(
            "{}/auth/reset-password?token={}",
            command.client_url(),
            issued.token
        );

        self.notifier
            .send_reset_link(&user.email, &user.name, &link)
            .await
            .map_err(|e| PasswordResetError::NotificationFailed(e.to_string()))?;

        info!(user_id = %user.id, "Password reset link sent");
        Ok(())
    }
}

#[async_trait]
impl VerifyResetTokenUseCase for PasswordResetService {
    async fn execute(&self, token: &str) -> Result<ResetTokenStatus, PasswordResetError> {
        let (claims, _) = self.check_token(token.trim()).await?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await
            .map_err(Self::repo_err)?
            .ok_or(PasswordResetError::InvalidToken)?;

        Ok(ResetTokenStatus { email: user.email })
    }
}

#[async_trait]
impl ResetPasswordUseCase for PasswordResetService {
    async fn execute(&self, command: ResetPasswordCommand) -> Result<(), PasswordResetError> {
        let (claims, stored) = self.check_token(command.token()).await?;

        let password_hash = self
            .hasher
            .hash_password(command.password())
            .await
            .map_err(|e| PasswordResetError::HashingFailed(e.to_string()))?;

        // a concurrent reset with the same token loses here
        let revoked = self
            .reset_tokens
            .redeem(stored.id, claims.sub, password_hash)
            .await
            .map_err(Self::repo_err)?
            .ok_or(PasswordResetError::InvalidToken)?;

        if revoked > 0 {
            warn!(user_id = %claims.sub, revoked, "Sessions revoked after password reset");
        }
        info!(user_id = %claims.sub, "Password reset completed");
        Ok(())
    }
}
