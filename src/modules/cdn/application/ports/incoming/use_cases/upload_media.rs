use async_trait::async_trait;

use crate::modules::cdn::application::domain::MediaKind;
use crate::modules::cdn::application::ports::outgoing::StorageError;
use crate::shared::http::multipart::UploadedFile;

#[derive(Debug, Clone)]
pub struct UploadMediaCommand {
    pub file: UploadedFile,
    /// Required for videos, which are stored per course.
    pub course_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedMedia {
    pub kind: MediaKind,
    pub file_name: String,
    pub file_url: String,
    pub original_name: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadMediaError {
    #[error("Unsupported file type. Only images and videos are allowed.")]
    UnsupportedType,

    #[error("Course ID is required for video uploads")]
    MissingCourseId,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[async_trait]
pub trait UploadMediaUseCase: Send + Sync {
    async fn execute(&self, command: UploadMediaCommand) -> Result<UploadedMedia, UploadMediaError>;
}
