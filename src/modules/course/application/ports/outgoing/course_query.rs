use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::course::application::domain::{
    Course, CourseDetail, PurchasedCourse, UserCourseView, UserLessonView, UserModuleView,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CourseQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side of the catalog. Learner views report `has_purchased` and leave the
/// access decision to the caller.
#[async_trait]
pub trait CourseQuery: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, CourseQueryError>;

    async fn course_detail(&self, course_id: i32) -> Result<Option<CourseDetail>, CourseQueryError>;

    async fn purchased_courses(&self, user_id: Uuid)
        -> Result<Vec<PurchasedCourse>, CourseQueryError>;

    async fn user_course(
        &self,
        user_id: Uuid,
        course_id: i32,
    ) -> Result<Option<UserCourseView>, CourseQueryError>;

    async fn user_module(
        &self,
        user_id: Uuid,
        module_id: i32,
    ) -> Result<Option<UserModuleView>, CourseQueryError>;

    async fn user_lesson(
        &self,
        user_id: Uuid,
        lesson_id: i32,
    ) -> Result<Option<UserLessonView>, CourseQueryError>;
}
