use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::review::application::domain::{Requester, Review, ReviewForm, ReviewTarget};
use crate::shared::api::FieldErrors;
use crate::shared::http::multipart::UploadedFile;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Author name and surname are required for an anonymous review")]
    AuthorRequired,

    #[error("Only images are allowed (jpg, png, gif, webp)")]
    NotAnImage,

    #[error("Image must not exceed 5 MB")]
    TooLarge,

    #[error("Review not found")]
    NotFound,

    #[error("Course not found")]
    CourseNotFound,

    #[error("You can only modify your own reviews")]
    Forbidden,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Optional `beforePhoto` / `afterPhoto` uploads.
#[derive(Debug, Clone, Default)]
pub struct ReviewPhotos {
    pub before: Option<UploadedFile>,
    pub after: Option<UploadedFile>,
}

#[async_trait]
pub trait ListReviewsUseCase: Send + Sync {
    async fn execute(&self, target: ReviewTarget) -> Result<Vec<Review>, ReviewError>;
}

#[async_trait]
pub trait ListCourseReviewsUseCase: Send + Sync {
    async fn execute(&self, course_id: i32) -> Result<Vec<Review>, ReviewError>;
}

#[async_trait]
pub trait GetReviewUseCase: Send + Sync {
    async fn execute(&self, target: ReviewTarget, id: i32) -> Result<Review, ReviewError>;
}

#[async_trait]
pub trait CreateReviewUseCase: Send + Sync {
    /// `author` is `None` for an anonymous submission.
    async fn execute(
        &self,
        target: ReviewTarget,
        author: Option<Uuid>,
        form: ReviewForm,
        photos: ReviewPhotos,
    ) -> Result<Review, ReviewError>;
}

#[async_trait]
pub trait UpdateReviewUseCase: Send + Sync {
    async fn execute(
        &self,
        target: ReviewTarget,
        id: i32,
        requester: Requester,
        form: ReviewForm,
        photos: ReviewPhotos,
    ) -> Result<Review, ReviewError>;
}

#[async_trait]
pub trait DeleteReviewUseCase: Send + Sync {
    async fn execute(
        &self,
        target: ReviewTarget,
        id: i32,
        requester: Requester,
    ) -> Result<(), ReviewError>;
}
