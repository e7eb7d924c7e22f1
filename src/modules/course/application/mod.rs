pub mod course_use_cases;
pub mod domain;
pub mod ports;
pub mod services;

pub use course_use_cases::CourseUseCases;
