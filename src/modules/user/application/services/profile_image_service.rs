use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::PublicUser;
use crate::modules::auth::application::ports::outgoing::{UserRepository, UserRepositoryError};
use crate::modules::cdn::application::domain::{
    extension_for, is_allowed_image, StorageKey, MAX_IMAGE_BYTES,
};
use crate::modules::cdn::application::ports::outgoing::FileStorage;
use crate::modules::user::application::ports::incoming::use_cases::{
    UploadProfileImageError, UploadProfileImageUseCase,
};
use crate::shared::http::multipart::UploadedFile;

const PROFILE_IMAGE_FOLDER: &str = "images";

pub struct ProfileImageService {
    users: Arc<dyn UserRepository + Send + Sync>,
    storage: Arc<dyn FileStorage + Send + Sync>,
}

impl ProfileImageService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        storage: Arc<dyn FileStorage + Send + Sync>,
    ) -> Self {
        Self { users, storage }
    }

    async fn remove_quietly(&self, key: &StorageKey) {
        if let Err(e) = self.storage.delete(key).await {
            warn!(key = %key, error = %e, "Failed to remove image file");
        }
    }
}

#[async_trait]
impl UploadProfileImageUseCase for ProfileImageService {
    async fn execute(
        &self,
        user_id: Uuid,
        image: UploadedFile,
    ) -> Result<PublicUser, UploadProfileImageError> {
        if !is_allowed_image(&image.content_type) {
            return Err(UploadProfileImageError::NotAnImage);
        }
        if image.bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadProfileImageError::TooLarge);
        }
        let extension =
            extension_for(&image.content_type).ok_or(UploadProfileImageError::NotAnImage)?;

        let current = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| UploadProfileImageError::RepositoryError(e.to_string()))?
            .ok_or(UploadProfileImageError::UserNotFound)?;

        let key = StorageKey::generate(&[PROFILE_IMAGE_FOLDER], extension)
            .ok_or_else(|| UploadProfileImageError::Storage("invalid storage key".into()))?;
        self.storage
            .save(&key, &image.bytes)
            .await
            .map_err(|e| UploadProfileImageError::Storage(e.to_string()))?;

        let updated = match self
            .users
            .update_image_url(user_id, Some(key.public_url()))
            .await
        {
            Ok(user) => user,
            Err(e) => {
                self.remove_quietly(&key).await;
                return Err(match e {
                    UserRepositoryError::NotFound => UploadProfileImageError::UserNotFound,
                    other => UploadProfileImageError::RepositoryError(other.to_string()),
                });
            }
        };

        if let Some(old) = current
            .image_url
            .as_deref()
            .and_then(StorageKey::from_public_url)
        {
            self.remove_quietly(&old).await;
        }

        info!(user_id = %user_id, url = ?updated.image_url, "Profile image replaced");
        Ok(updated.into())
    }
}
