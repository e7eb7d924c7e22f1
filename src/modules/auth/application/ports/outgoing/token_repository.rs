use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::StoredToken;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TokenRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Refresh tokens are stored as SHA-256 hashes, never raw.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn store(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError>;

    async fn find_by_hash(&self, token_hash: &str)
        -> Result<Option<StoredToken>, TokenRepositoryError>;

    /// Returns whether a row was removed.
    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, TokenRepositoryError>;

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, TokenRepositoryError>;

    async fn delete_expired(&self) -> Result<u64, TokenRepositoryError>;
}

#[async_trait]
pub trait PasswordResetTokenRepository: Send + Sync {
    async fn store(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError>;

    async fn find_by_hash(&self, token_hash: &str)
        -> Result<Option<StoredToken>, TokenRepositoryError>;

    /// Marks the token used, stores the new password hash and drops every
    /// refresh token of the user in one transaction.
    ///
    /// Returns `None` when the token was already used or the user is gone,
    /// otherwise the number of revoked sessions.
    async fn redeem(
        &self,
        id: i32,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<Option<u64>, TokenRepositoryError>;

    async fn delete_expired(&self) -> Result<u64, TokenRepositoryError>;
}
