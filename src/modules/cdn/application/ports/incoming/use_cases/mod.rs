pub mod serve_file;
pub mod upload_media;

pub use serve_file::{ServeCourseVideoUseCase, ServeFileError, ServePublicFileUseCase, ServedFile};
pub use upload_media::{UploadMediaCommand, UploadMediaError, UploadMediaUseCase, UploadedMedia};
