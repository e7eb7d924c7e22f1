pub mod benefits;
pub mod course_benefits;
pub mod course_equipment;
pub mod courses;
pub mod equipment;
pub mod lesson_equipment;
pub mod lessons;
pub mod module_equipment;
pub mod modules;
