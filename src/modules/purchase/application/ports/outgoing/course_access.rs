use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Access check failed: {0}")]
pub struct AccessCheckError(pub String);

/// Answers whether a user owns a course.
#[async_trait]
pub trait CourseAccess: Send + Sync {
    async fn has_purchased(&self, user_id: Uuid, course_id: i32) -> Result<bool, AccessCheckError>;
}
