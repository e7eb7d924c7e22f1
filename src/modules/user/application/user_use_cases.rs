use std::sync::Arc;

use crate::modules::user::application::ports::incoming::use_cases::{
    GetProfileUseCase, ListUsersUseCase, UpdateProfileUseCase, UploadProfileImageUseCase,
};

#[derive(Clone)]
pub struct UserUseCases {
    pub list: Arc<dyn ListUsersUseCase + Send + Sync>,
    pub get_profile: Arc<dyn GetProfileUseCase + Send + Sync>,
    pub update_profile: Arc<dyn UpdateProfileUseCase + Send + Sync>,
    pub upload_image: Arc<dyn UploadProfileImageUseCase + Send + Sync>,
}
