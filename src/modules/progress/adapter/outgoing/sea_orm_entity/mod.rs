pub mod course_progress;
pub mod lesson_progress;
pub mod module_progress;
