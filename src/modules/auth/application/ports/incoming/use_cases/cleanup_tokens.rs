use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub refresh_tokens: u64,
    pub reset_tokens: u64,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Token cleanup failed: {0}")]
pub struct CleanupTokensError(pub String);

#[async_trait]
pub trait CleanupExpiredTokensUseCase: Send + Sync {
    async fn execute(&self) -> Result<CleanupReport, CleanupTokensError>;
}
