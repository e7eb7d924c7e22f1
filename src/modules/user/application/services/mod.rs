pub mod profile_image_service;
pub mod user_profile_service;

pub use profile_image_service::ProfileImageService;
pub use user_profile_service::UserProfileService;
