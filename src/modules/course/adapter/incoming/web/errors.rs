use crate::modules::course::application::ports::incoming::use_cases::{
    CatalogError, LearnerError,
};
use crate::shared::api::AppError;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => AppError::not_found("COURSE_NOT_FOUND", err.to_string()),
            CatalogError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}

impl From<LearnerError> for AppError {
    fn from(err: LearnerError) -> Self {
        match err {
            LearnerError::CourseNotFound => {
                AppError::not_found("COURSE_NOT_FOUND", err.to_string())
            }
            LearnerError::ModuleNotFound => {
                AppError::not_found("MODULE_NOT_FOUND", err.to_string())
            }
            LearnerError::LessonNotFound => {
                AppError::not_found("LESSON_NOT_FOUND", err.to_string())
            }
            LearnerError::NotPurchased => AppError::forbidden(
                "COURSE_NOT_PURCHASED",
                "User has not purchased this course",
            ),
            LearnerError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}
