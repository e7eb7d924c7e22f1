use crate::modules::user::application::ports::incoming::use_cases::{
    ListUsersError, ProfileError, UploadProfileImageError,
};
use crate::shared::api::AppError;

impl From<ListUsersError> for AppError {
    fn from(err: ListUsersError) -> Self {
        match err {
            ListUsersError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Validation(errors) => AppError::Validation {
                message: "Validation failed".to_string(),
                errors,
            },
            ProfileError::NotFound => AppError::not_found("USER_NOT_FOUND", "User not found"),
            ProfileError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}

impl From<UploadProfileImageError> for AppError {
    fn from(err: UploadProfileImageError) -> Self {
        match err {
            UploadProfileImageError::NotAnImage => {
                AppError::bad_request("UNSUPPORTED_FILE_TYPE", err.to_string())
            }
            UploadProfileImageError::TooLarge => {
                AppError::bad_request("FILE_TOO_LARGE", err.to_string())
            }
            UploadProfileImageError::UserNotFound => {
                AppError::not_found("USER_NOT_FOUND", "User not found")
            }
            UploadProfileImageError::Storage(msg) => AppError::Internal(msg),
            UploadProfileImageError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}
