pub mod progress_repository;

pub use progress_repository::{LockedCourse, ProgressRepository, ProgressRepositoryError};
