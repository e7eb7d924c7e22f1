use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::PublicUser;
use crate::shared::http::multipart::UploadedFile;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadProfileImageError {
    #[error("Only images are allowed (jpg, png, gif, webp)")]
    NotAnImage,

    #[error("Image must not exceed 5 MB")]
    TooLarge,

    #[error("User not found")]
    UserNotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UploadProfileImageUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        image: UploadedFile,
    ) -> Result<PublicUser, UploadProfileImageError>;
}
