use crate::modules::cdn::application::ports::incoming::use_cases::{
    ServeFileError, UploadMediaError,
};
use crate::modules::cdn::application::ports::outgoing::StorageError;
use crate::shared::api::AppError;

impl From<UploadMediaError> for AppError {
    fn from(err: UploadMediaError) -> Self {
        match err {
            UploadMediaError::UnsupportedType => {
                AppError::bad_request("UNSUPPORTED_FILE_TYPE", err.to_string())
            }
            UploadMediaError::MissingCourseId => AppError::validation("courseId", err.to_string()),
            UploadMediaError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AppError::not_found("FILE_NOT_FOUND", "File not found"),
            StorageError::Io(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ServeFileError> for AppError {
    fn from(err: ServeFileError) -> Self {
        match err {
            ServeFileError::InvalidPath => {
                AppError::bad_request("INVALID_FILE_PATH", err.to_string())
            }
            ServeFileError::NotFound => AppError::not_found("FILE_NOT_FOUND", err.to_string()),
            ServeFileError::NotPurchased => {
                AppError::forbidden("COURSE_NOT_PURCHASED", err.to_string())
            }
            ServeFileError::Storage(msg) => AppError::Internal(msg),
        }
    }
}
