pub mod media;

pub use media::{
    content_type_for, extension_for, is_allowed_image, is_safe_file_name, MediaKind,
    PublicFolder, StorageKey, MAX_IMAGE_BYTES, MAX_UPLOAD_BYTES,
};
