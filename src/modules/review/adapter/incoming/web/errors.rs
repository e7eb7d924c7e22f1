use crate::modules::review::application::ports::incoming::use_cases::ReviewError;
use crate::shared::api::AppError;

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Validation(errors) => AppError::Validation {
                message: "Invalid review data".to_string(),
                errors,
            },
            ReviewError::AuthorRequired => AppError::bad_request("AUTHOR_REQUIRED", err.to_string()),
            ReviewError::NotAnImage => {
                AppError::bad_request("UNSUPPORTED_FILE_TYPE", err.to_string())
            }
            ReviewError::TooLarge => AppError::bad_request("FILE_TOO_LARGE", err.to_string()),
            ReviewError::NotFound => AppError::not_found("REVIEW_NOT_FOUND", err.to_string()),
            ReviewError::CourseNotFound => {
                AppError::not_found("COURSE_NOT_FOUND", err.to_string())
            }
            ReviewError::Forbidden => AppError::forbidden("NOT_REVIEW_OWNER", err.to_string()),
            ReviewError::Storage(msg) => AppError::Internal(msg),
            ReviewError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}
