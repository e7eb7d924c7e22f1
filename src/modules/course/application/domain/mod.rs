pub mod catalog;

#[cfg(test)]
pub(crate) use catalog::sample_course;
pub use catalog::{
    neighbours, Benefit, Course, CourseDetail, Equipment, Lesson, LessonModuleRef,
    LessonWithProgress, Module, ModuleSummary, ModuleWithLessons, PurchasedCourse, TitleRef,
    UserCourseView, UserLessonView, UserModuleView,
};
