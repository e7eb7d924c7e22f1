use async_trait::async_trait;

use crate::modules::course::application::domain::{Course, CourseDetail};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Course not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListCoursesUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Course>, CatalogError>;
}

#[async_trait]
pub trait GetCourseUseCase: Send + Sync {
    async fn execute(&self, course_id: i32) -> Result<CourseDetail, CatalogError>;
}
