use std::sync::Arc;

use crate::modules::cdn::application::ports::incoming::use_cases::{
    ServeCourseVideoUseCase, ServePublicFileUseCase, UploadMediaUseCase,
};

#[derive(Clone)]
pub struct CdnUseCases {
    pub upload: Arc<dyn UploadMediaUseCase + Send + Sync>,
    pub serve_public: Arc<dyn ServePublicFileUseCase + Send + Sync>,
    pub serve_video: Arc<dyn ServeCourseVideoUseCase + Send + Sync>,
}
