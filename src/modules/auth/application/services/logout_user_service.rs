use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::modules::auth::application::ports::incoming::use_cases::{
    LogoutError, LogoutUserUseCase,
};
use crate::modules::auth::application::ports::outgoing::RefreshTokenRepository;

use super::token_hasher::hash_token;

#[derive(Clone)]
pub struct LogoutUserService {
    refresh_tokens: Arc<dyn RefreshTokenRepository + Send + Sync>,
}

impl LogoutUserService {
    pub fn new(refresh_tokens: Arc<dyn RefreshTokenRepository + Send + Sync>) -> Self {
        Self { refresh_tokens }
    }
}

#[async_trait]
impl LogoutUserUseCase for LogoutUserService {
    async fn execute(&self, refresh_token: Option<&str>) -> Result<(), LogoutError> {
        let Some(token) = refresh_token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        let removed = self
            .refresh_tokens
            .delete_by_hash(&hash_token(token))
            .await
            .map_err(|e| LogoutError::RepositoryError(e.to_string()))?;

        debug!(removed, "Logout processed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::auth_fakes::InMemoryRefreshTokens;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_logout_removes_known_token() {
        let repo = Arc::new(InMemoryRefreshTokens::default());
        repo.store(
            Uuid::new_v4(),
            hash_token("the-token"),
            Utc::now() + Duration::hours(1),
        )
        .await
        .unwrap();
        let service = LogoutUserService::new(repo.clone());

        service.execute(Some("the-token")).await.unwrap();

        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_logout_without_token_is_ok() {
        let service = LogoutUserService::new(Arc::new(InMemoryRefreshTokens::default()));

        assert!(service.execute(None).await.is_ok());
        assert!(service.execute(Some("unknown")).await.is_ok());
    }
}
