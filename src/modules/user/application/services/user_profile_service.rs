use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::PublicUser;
use crate::modules::auth::application::ports::outgoing::{UserRepository, UserRepositoryError};
use crate::modules::user::application::domain::ProfileEdit;
use crate::modules::user::application::ports::incoming::use_cases::{
    GetProfileUseCase, ListUsersError, ListUsersUseCase, ProfileError, UpdateProfileUseCase,
};

impl From<UserRepositoryError> for ProfileError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound => ProfileError::NotFound,
            other => ProfileError::RepositoryError(other.to_string()),
        }
    }
}

/// Read and edit accounts through the shared user repository.
pub struct UserProfileService {
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl UserProfileService {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl ListUsersUseCase for UserProfileService {
    async fn execute(&self) -> Result<Vec<PublicUser>, ListUsersError> {
        let users = self
            .users
            .list_all()
            .await
            .map_err(|e| ListUsersError::RepositoryError(e.to_string()))?;

        Ok(users.into_iter().map(PublicUser::from).collect())
    }
}

#[async_trait]
impl GetProfileUseCase for UserProfileService {
    async fn execute(&self, user_id: Uuid) -> Result<PublicUser, ProfileError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or(ProfileError::NotFound)
    }
}

#[async_trait]
impl UpdateProfileUseCase for UserProfileService {
    async fn execute(&self, user_id: Uuid, edit: ProfileEdit) -> Result<PublicUser, ProfileError> {
        let changes = edit.validate().map_err(ProfileError::Validation)?;

        let user = self.users.update_profile(user_id, changes).await?;
        info!(user_id = %user_id, "Profile updated");

        Ok(user.into())
    }
}
