use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::PublicUser;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListUsersError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListUsersUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<PublicUser>, ListUsersError>;
}
