use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::modules::auth::application::ports::incoming::use_cases::{
    CleanupExpiredTokensUseCase, CleanupReport, CleanupTokensError,
};
use crate::modules::auth::application::ports::outgoing::{
    PasswordResetTokenRepository, RefreshTokenRepository,
};

pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone)]
pub struct CleanupExpiredTokensService {
    refresh_tokens: Arc<dyn RefreshTokenRepository + Send + Sync>,
    reset_tokens: Arc<dyn PasswordResetTokenRepository + Send + Sync>,
}

impl CleanupExpiredTokensService {
    pub fn new(
        refresh_tokens: Arc<dyn RefreshTokenRepository + Send + Sync>,
        reset_tokens: Arc<dyn PasswordResetTokenRepository + Send + Sync>,
    ) -> Self {
        Self {
            refresh_tokens,
            reset_tokens,
        }
    }
}

#[async_trait]
impl CleanupExpiredTokensUseCase for CleanupExpiredTokensService {
    async fn execute(&self) -> Result<CleanupReport, CleanupTokensError> {
        let refresh_tokens = self
            .refresh_tokens
            .delete_expired()
            .await
            .map_err(|e| CleanupTokensError(e.to_string()))?;
        let reset_tokens = self
            .reset_tokens
            .delete_expired()
            .await
            .map_err(|e| CleanupTokensError(e.to_string()))?;

        Ok(CleanupReport {
            refresh_tokens,
            reset_tokens,
        })
    }
}

/// Runs the cleanup every [`CLEANUP_INTERVAL`] until the runtime shuts down.
pub fn spawn_token_cleanup(
    use_case: Arc<dyn CleanupExpiredTokensUseCase + Send + Sync>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            ticker.tick().await;
            match use_case.execute().await {
                Ok(report) => info!(
                    refresh_tokens = report.refresh_tokens,
                    reset_tokens = report.reset_tokens,
                    "Expired tokens removed"
                ),
                Err(e) => error!(error = %e, "Token cleanup failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::auth_fakes::{InMemoryRefreshTokens, InMemoryResetTokens};
    use chrono::{Duration as ChronoDuration, Utc};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_cleanup_removes_only_expired() {
        let refresh = Arc::new(InMemoryRefreshTokens::default());
        let user_id = Uuid::new_v4();
        refresh
            .store(user_id, "old".into(), Utc::now() - ChronoDuration::minutes(1))
            .await
            .unwrap();
        refresh
            .store(user_id, "live".into(), Utc::now() + ChronoDuration::hours(1))
            .await
            .unwrap();

        let service =
            CleanupExpiredTokensService::new(refresh.clone(), Arc::new(InMemoryResetTokens::default()));
        let report = service.execute().await.unwrap();

        assert_eq!(report.refresh_tokens, 1);
        assert_eq!(report.reset_tokens, 0);
        assert_eq!(refresh.len(), 1);
    }
}
