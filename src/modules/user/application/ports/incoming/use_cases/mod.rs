pub mod list_users;
pub mod profile;
pub mod upload_profile_image;

pub use list_users::{ListUsersError, ListUsersUseCase};
pub use profile::{GetProfileUseCase, ProfileError, UpdateProfileUseCase};
pub use upload_profile_image::{UploadProfileImageError, UploadProfileImageUseCase};
