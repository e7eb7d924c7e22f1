use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::modules::cdn::application::domain::{
    content_type_for, extension_for, is_safe_file_name, MediaKind, PublicFolder, StorageKey,
};
use crate::modules::cdn::application::ports::incoming::use_cases::{
    ServeCourseVideoUseCase, ServeFileError, ServePublicFileUseCase, ServedFile,
    UploadMediaCommand, UploadMediaError, UploadMediaUseCase, UploadedMedia,
};
use crate::modules::cdn::application::ports::outgoing::{FileStorage, StorageError};
use crate::modules::purchase::application::ports::outgoing::CourseAccess;

pub struct CdnService {
    storage: Arc<dyn FileStorage + Send + Sync>,
    access: Arc<dyn CourseAccess + Send + Sync>,
}

impl CdnService {
    pub fn new(
        storage: Arc<dyn FileStorage + Send + Sync>,
        access: Arc<dyn CourseAccess + Send + Sync>,
    ) -> Self {
        Self { storage, access }
    }

    async fn locate(&self, key: &StorageKey) -> Result<ServedFile, ServeFileError> {
        let path = self.storage.locate(key).await.map_err(|e| match e {
            StorageError::NotFound => ServeFileError::NotFound,
            StorageError::Io(msg) => ServeFileError::Storage(msg),
        })?;

        Ok(ServedFile {
            path,
            content_type: content_type_for(key.file_name()),
        })
    }
}

#[async_trait]
impl UploadMediaUseCase for CdnService {
    async fn execute(
        &self,
        command: UploadMediaCommand,
    ) -> Result<UploadedMedia, UploadMediaError> {
        let file = command.file;
        let kind = MediaKind::from_content_type(&file.content_type)
            .ok_or(UploadMediaError::UnsupportedType)?;
        let extension =
            extension_for(&file.content_type).ok_or(UploadMediaError::UnsupportedType)?;

        let key = match kind {
            MediaKind::Image => StorageKey::generate(&["images"], extension),
            MediaKind::Video => {
                let course_id = command
                    .course_id
                    .ok_or(UploadMediaError::MissingCourseId)?
                    .to_string();
                StorageKey::generate(&["videos", course_id.as_str()], extension)
            }
        }
        .ok_or_else(|| StorageError::Io("could not build storage key".to_string()))?;

        self.storage.save(&key, &file.bytes).await?;
        info!(key = %key, size = file.bytes.len(), "Media uploaded");

        Ok(UploadedMedia {
            kind,
            file_name: key.file_name().to_string(),
            file_url: key.public_url(),
            original_name: file.original_name,
        })
    }
}

#[async_trait]
impl ServePublicFileUseCase for CdnService {
    async fn execute(
        &self,
        folder: PublicFolder,
        file_name: &str,
    ) -> Result<ServedFile, ServeFileError> {
        let key = StorageKey::new([folder.as_str(), file_name]).ok_or(ServeFileError::InvalidPath)?;
        self.locate(&key).await
    }
}

#[async_trait]
impl ServeCourseVideoUseCase for CdnService {
    async fn execute(
        &self,
        user_id: Uuid,
        course_id: i32,
        file_name: &str,
    ) -> Result<ServedFile, ServeFileError> {
        if !is_safe_file_name(file_name) {
            return Err(ServeFileError::InvalidPath);
        }

        let owned = self
            .access
            .has_purchased(user_id, course_id)
            .await
            .map_err(|e| ServeFileError::Storage(e.to_string()))?;
        if !owned {
            warn!(user_id = %user_id, course_id, "Video requested without purchase");
            return Err(ServeFileError::NotPurchased);
        }

        let course_dir = course_id.to_string();
        let key = StorageKey::new(["videos", course_dir.as_str(), file_name])
            .ok_or(ServeFileError::InvalidPath)?;

        let mut served = self.locate(&key).await?;
        served.content_type = "video/mp4";
        Ok(served)
    }
}
