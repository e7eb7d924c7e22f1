use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::course::application::domain::{
    PurchasedCourse, UserCourseView, UserLessonView, UserModuleView,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LearnerError {
    #[error("Course not found")]
    CourseNotFound,

    #[error("Module not found")]
    ModuleNotFound,

    #[error("Lesson not found")]
    LessonNotFound,

    #[error("Course has not been purchased")]
    NotPurchased,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListPurchasedCoursesUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<PurchasedCourse>, LearnerError>;
}

#[async_trait]
pub trait GetUserCourseUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, course_id: i32) -> Result<UserCourseView, LearnerError>;
}

#[async_trait]
pub trait GetUserModuleUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, module_id: i32) -> Result<UserModuleView, LearnerError>;
}

#[async_trait]
pub trait GetUserLessonUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, lesson_id: i32) -> Result<UserLessonView, LearnerError>;
}
