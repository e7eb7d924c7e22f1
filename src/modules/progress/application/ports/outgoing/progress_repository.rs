use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::progress::application::domain::{
    CourseTree, LessonProgress, ProgressPlan, ProgressSnapshot,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProgressRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Course that contains the lesson, if the lesson exists.
    async fn course_of_lesson(&self, lesson_id: i32) -> Result<Option<i32>, ProgressRepositoryError>;

    /// Course that contains the module, if the module exists.
    async fn course_of_module(&self, module_id: i32) -> Result<Option<i32>, ProgressRepositoryError>;

    /// Sets only the playback position. `None` when the lesson is locked or
    /// the user has no row for it.
    async fn save_position(
        &self,
        user_id: Uuid,
        lesson_id: i32,
        position: i32,
    ) -> Result<Option<LessonProgress>, ProgressRepositoryError>;

    /// Opens a transaction, locks the user's course row and loads the course
    /// skeleton with every progress row the user has in it.
    async fn lock_course(
        &self,
        user_id: Uuid,
        course_id: i32,
    ) -> Result<Box<dyn LockedCourse>, ProgressRepositoryError>;
}

/// A course snapshot read inside an open transaction. Dropping it without
/// `commit` rolls the transaction back.
#[async_trait]
pub trait LockedCourse: Send {
    fn tree(&self) -> &CourseTree;

    fn snapshot(&self) -> &ProgressSnapshot;

    /// Upserts all rows of the plan and commits.
    async fn commit(self: Box<Self>, plan: &ProgressPlan) -> Result<(), ProgressRepositoryError>;
}
