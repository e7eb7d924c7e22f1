use crate::modules::progress::application::ports::incoming::use_cases::ProgressError;
use crate::shared::api::AppError;

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::InvalidPosition => AppError::validation("position", err.to_string()),
            ProgressError::LessonNotFound => {
                AppError::not_found("LESSON_NOT_FOUND", "Lesson not found")
            }
            ProgressError::ModuleNotFound => {
                AppError::not_found("MODULE_NOT_FOUND", "Module not found")
            }
            ProgressError::NotPurchased => AppError::forbidden(
                "COURSE_NOT_PURCHASED",
                "User has not purchased the course containing this content",
            ),
            ProgressError::LessonLocked => {
                AppError::forbidden("LESSON_LOCKED", "Lesson is locked")
            }
            ProgressError::ModuleLocked => {
                AppError::forbidden("MODULE_LOCKED", "Module is locked")
            }
            ProgressError::ModuleHasNoLessons => {
                AppError::bad_request("MODULE_HAS_NO_LESSONS", "No lessons found in this module")
            }
            ProgressError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}
