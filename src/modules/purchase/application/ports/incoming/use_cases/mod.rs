pub mod purchase_courses;

pub use purchase_courses::{PurchaseCoursesUseCase, PurchaseError, PurchaseRequest};
