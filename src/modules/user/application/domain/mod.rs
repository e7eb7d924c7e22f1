pub mod profile;

pub use profile::{is_valid_phone, ProfileEdit};
