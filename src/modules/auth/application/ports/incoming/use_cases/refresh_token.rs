use async_trait::async_trait;

use super::auth_session::AuthSession;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token is required")]
    MissingToken,

    #[error("Invalid or expired refresh token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Exchanges a stored refresh token for a new pair. The presented token is revoked.
#[async_trait]
pub trait RefreshTokenUseCase: Send + Sync {
    async fn execute(&self, refresh_token: &str) -> Result<AuthSession, RefreshTokenError>;
}
