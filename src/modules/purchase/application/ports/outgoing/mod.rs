pub mod course_access;
pub mod purchase_repository;

pub use course_access::{AccessCheckError, CourseAccess};
pub use purchase_repository::{PurchaseRepository, PurchaseRepositoryError};
