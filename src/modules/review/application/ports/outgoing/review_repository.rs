use async_trait::async_trait;

use crate::modules::review::application::domain::{NewReview, Review, ReviewChanges, ReviewTarget};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewRepositoryError {
    #[error("Review not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Storage for general and course reviews. Reads include the author's public profile.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, target: ReviewTarget) -> Result<Vec<Review>, ReviewRepositoryError>;

    async fn list_for_course(&self, course_id: i32) -> Result<Vec<Review>, ReviewRepositoryError>;

    async fn find(
        &self,
        target: ReviewTarget,
        id: i32,
    ) -> Result<Option<Review>, ReviewRepositoryError>;

    async fn course_exists(&self, course_id: i32) -> Result<bool, ReviewRepositoryError>;

    async fn create(&self, review: NewReview) -> Result<Review, ReviewRepositoryError>;

    async fn update(
        &self,
        target: ReviewTarget,
        id: i32,
        changes: ReviewChanges,
    ) -> Result<Review, ReviewRepositoryError>;

    /// Returns `false` when no row was removed.
    async fn delete(&self, target: ReviewTarget, id: i32) -> Result<bool, ReviewRepositoryError>;
}
