pub mod course_catalog_service;
pub mod learner_course_service;

pub use course_catalog_service::CourseCatalogService;
pub use learner_course_service::LearnerCourseService;
