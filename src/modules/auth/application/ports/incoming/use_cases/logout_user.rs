use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LogoutError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait LogoutUserUseCase: Send + Sync {
    /// Revokes the token when it is known. Unknown or absent tokens are not an error.
    async fn execute(&self, refresh_token: Option<&str>) -> Result<(), LogoutError>;
}
