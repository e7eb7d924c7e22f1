pub mod course_selector;
pub mod purchase_service;

pub use course_selector::CourseSelector;
pub use purchase_service::PurchaseService;
