use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::progress::application::domain::{
    CompleteLessonResult, CompleteModuleResult, LessonProgress,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProgressError {
    #[error("Position must be a non-negative number of seconds")]
    InvalidPosition,

    #[error("Lesson not found")]
    LessonNotFound,

    #[error("Module not found")]
    ModuleNotFound,

    #[error("User has not purchased this course")]
    NotPurchased,

    #[error("Lesson is locked")]
    LessonLocked,

    #[error("Module is locked")]
    ModuleLocked,

    #[error("Module has no lessons")]
    ModuleHasNoLessons,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdateLessonPositionUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        lesson_id: i32,
        position: i64,
    ) -> Result<LessonProgress, ProgressError>;
}

#[async_trait]
pub trait CompleteLessonUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        lesson_id: i32,
    ) -> Result<CompleteLessonResult, ProgressError>;
}

#[async_trait]
pub trait CompleteModuleUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        module_id: i32,
    ) -> Result<CompleteModuleResult, ProgressError>;
}
