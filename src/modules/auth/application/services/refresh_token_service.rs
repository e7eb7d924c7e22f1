use async_trait::async_trait;
use tracing::{debug, warn};

use crate::modules::auth::application::ports::incoming::use_cases::{
    AuthSession, RefreshTokenError, RefreshTokenUseCase,
};
use crate::modules::auth::application::ports::outgoing::{TokenType, UserRepository};
use std::sync::Arc;

use super::session_issuer::{SessionError, SessionIssuer};
use super::token_hasher::hash_token;

impl From<SessionError> for RefreshTokenError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Token(e) => RefreshTokenError::TokenGenerationFailed(e.to_string()),
            SessionError::Repository(e) => RefreshTokenError::RepositoryError(e.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct RefreshTokenService {
    users: Arc<dyn UserRepository + Send + Sync>,
    sessions: SessionIssuer,
}

impl RefreshTokenService {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>, sessions: SessionIssuer) -> Self {
        Self { users, sessions }
    }
}

#[async_trait]
impl RefreshTokenUseCase for RefreshTokenService {
    async fn execute(&self, refresh_token: &str) -> Result<AuthSession, RefreshTokenError> {
        let refresh_token = refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(RefreshTokenError::MissingToken);
        }

        let claims = self
            .sessions
            .tokens()
            .verify_token_of_type(refresh_token, TokenType::Refresh)
            .map_err(|e| {
                debug!(error = %e, "Refresh token rejected");
                RefreshTokenError::InvalidToken
            })?;

        let token_hash = hash_token(refresh_token);
        let repo = self.sessions.refresh_tokens();

        let stored = repo
            .find_by_hash(&token_hash)
            .await
            .map_err(|e| RefreshTokenError::RepositoryError(e.to_string()))?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "Refresh token not on record, possibly reused");
                RefreshTokenError::InvalidToken
            })?;

        // rotation: only the caller that removes the row may continue
        let consumed = repo
            .delete_by_hash(&token_hash)
            .await
            .map_err(|e| RefreshTokenError::RepositoryError(e.to_string()))?;
        if !consumed {
            warn!(user_id = %claims.sub, "Refresh token already consumed");
            return Err(RefreshTokenError::InvalidToken);
        }

        if stored.is_expired() || stored.user_id != claims.sub {
            return Err(RefreshTokenError::InvalidToken);
        }

        let user = self
            .users
            .find_by_id(claims.sub)
            .await
            .map_err(|e| RefreshTokenError::RepositoryError(e.to_string()))?
            .ok_or(RefreshTokenError::UserNotFound)?;

        Ok(self.sessions.issue(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::{sample_user, Role};
    use crate::modules::auth::application::domain::entities::StoredToken;
    use crate::modules::auth::application::ports::outgoing::{
        RefreshTokenRepository, TokenProvider, TokenRepositoryError,
    };
    use crate::tests::support::auth_fakes::{
        session_issuer, test_token_provider, InMemoryRefreshTokens, InMemoryUsers,
    };
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Yields after every lookup so concurrent refreshes interleave.
    struct InterleavingRefreshTokens(Arc<InMemoryRefreshTokens>);

    #[async_trait]
    impl RefreshTokenRepository for InterleavingRefreshTokens {
        async fn store(
            &self,
            user_id: Uuid,
            token_hash: String,
            expires_at: DateTime<Utc>,
        ) -> Result<(), TokenRepositoryError> {
            self.0.store(user_id, token_hash, expires_at).await
        }

        async fn find_by_hash(
            &self,
            token_hash: &str,
        ) -> Result<Option<StoredToken>, TokenRepositoryError> {
            let found = self.0.find_by_hash(token_hash).await;
            tokio::task::yield_now().await;
            found
        }

        async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, TokenRepositoryError> {
            self.0.delete_by_hash(token_hash).await
        }

        async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, TokenRepositoryError> {
            self.0.delete_all_for_user(user_id).await
        }

        async fn delete_expired(&self) -> Result<u64, TokenRepositoryError> {
            self.0.delete_expired().await
        }
    }

    #[tokio::test]
    async fn test_rotation_invalidates_presented_token() {
        let user = sample_user(Role::User);
        let users = Arc::new(InMemoryUsers::with(vec![user.clone()]));
        let refresh = Arc::new(InMemoryRefreshTokens::default());
        let sessions = session_issuer(refresh.clone());
        let first = sessions.issue(user).await.unwrap();

        let service = RefreshTokenService::new(users, sessions);
        let second = service.execute(&first.refresh_token).await.unwrap();

        assert_ne!(second.refresh_token, first.refresh_token);
        assert_eq!(refresh.len(), 1);
        assert_eq!(
            service.execute(&first.refresh_token).await.unwrap_err(),
            RefreshTokenError::InvalidToken
        );
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_redeem_token_once() {
        let user = sample_user(Role::User);
        let users = Arc::new(InMemoryUsers::with(vec![user.clone()]));
        let stored = Arc::new(InMemoryRefreshTokens::default());
        let tokens: Arc<dyn TokenProvider + Send + Sync> = test_token_provider();
        let sessions = SessionIssuer::new(
            tokens,
            Arc::new(InterleavingRefreshTokens(stored.clone())),
        );
        let first = sessions.issue(user).await.unwrap();
        let service = RefreshTokenService::new(users, sessions);

        let (a, b) = tokio::join!(
            service.execute(&first.refresh_token),
            service.execute(&first.refresh_token),
        );

        assert!(a.is_ok());
        assert_eq!(b.unwrap_err(), RefreshTokenError::InvalidToken);
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_access_token_cannot_refresh() {
        let user = sample_user(Role::User);
        let users = Arc::new(InMemoryUsers::with(vec![user.clone()]));
        let sessions = session_issuer(Arc::new(InMemoryRefreshTokens::default()));
        let session = sessions.issue(user).await.unwrap();

        let service = RefreshTokenService::new(users, sessions);

        assert_eq!(
            service.execute(&session.access_token).await.unwrap_err(),
            RefreshTokenError::InvalidToken
        );
    }

    #[tokio::test]
    async fn test_blank_token_is_missing() {
        let service = RefreshTokenService::new(
            Arc::new(InMemoryUsers::default()),
            session_issuer(Arc::new(InMemoryRefreshTokens::default())),
        );

        assert_eq!(
            service.execute("  ").await.unwrap_err(),
            RefreshTokenError::MissingToken
        );
    }
}
