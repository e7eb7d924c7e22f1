use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use crate::modules::cdn::application::domain::PublicFolder;

#[derive(Debug, Clone, PartialEq)]
pub struct ServedFile {
    pub path: PathBuf,
    pub content_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServeFileError {
    #[error("Invalid file path")]
    InvalidPath,

    #[error("File not found")]
    NotFound,

    #[error("You must purchase this course to access its videos")]
    NotPurchased,

    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait ServePublicFileUseCase: Send + Sync {
    async fn execute(
        &self,
        folder: PublicFolder,
        file_name: &str,
    ) -> Result<ServedFile, ServeFileError>;
}

#[async_trait]
pub trait ServeCourseVideoUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: i32,
        file_name: &str,
    ) -> Result<ServedFile, ServeFileError>;
}
