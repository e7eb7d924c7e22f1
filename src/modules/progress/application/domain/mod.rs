pub mod cascade;
pub mod rows;
pub mod tree;

pub use cascade::{
    percent, plan_enrollment, plan_lesson_completion, plan_module_completion, CascadeError,
    CompleteLessonResult, CompleteModuleResult, ProgressPlan,
};
pub use rows::{CourseProgress, LessonProgress, ModuleProgress};
pub use tree::{CourseTree, LessonNode, ModuleNode, ProgressSnapshot};
