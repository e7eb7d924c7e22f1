use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::PublicUser;
use crate::modules::user::application::domain::ProfileEdit;
use crate::shared::api::FieldErrors;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("User not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait GetProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<PublicUser, ProfileError>;
}

#[async_trait]
pub trait UpdateProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, edit: ProfileEdit) -> Result<PublicUser, ProfileError>;
}
