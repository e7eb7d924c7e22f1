use std::sync::Arc;

use crate::modules::auth::application::domain::entities::{PublicUser, User};
use crate::modules::auth::application::ports::incoming::use_cases::AuthSession;
use crate::modules::auth::application::ports::outgoing::{
    RefreshTokenRepository, TokenError, TokenProvider, TokenRepositoryError,
};

use super::token_hasher::hash_token;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Repository(#[from] TokenRepositoryError),
}

/// Signs an access/refresh pair and records the refresh token hash.
#[derive(Clone)]
pub struct SessionIssuer {
    tokens: Arc<dyn TokenProvider + Send + Sync>,
    refresh_tokens: Arc<dyn RefreshTokenRepository + Send + Sync>,
}

impl SessionIssuer {
    pub fn new(
        tokens: Arc<dyn TokenProvider + Send + Sync>,
        refresh_tokens: Arc<dyn RefreshTokenRepository + Send + Sync>,
    ) -> Self {
        Self {
            tokens,
            refresh_tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenProvider + Send + Sync> {
        &self.tokens
    }

    pub fn refresh_tokens(&self) -> &Arc<dyn RefreshTokenRepository + Send + Sync> {
        &self.refresh_tokens
    }

    pub async fn issue(&self, user: User) -> Result<AuthSession, SessionError> {
        let access = self.tokens.generate_access_token(user.id, user.role)?;
        let refresh = self.tokens.generate_refresh_token(user.id, user.role)?;

        self.refresh_tokens
            .store(user.id, hash_token(&refresh.token), refresh.expires_at)
            .await?;

        Ok(AuthSession {
            user: PublicUser::from(user),
            access_token: access.token,
            refresh_token: refresh.token,
            refresh_expires_in: self.tokens.refresh_token_ttl(),
        })
    }
}
