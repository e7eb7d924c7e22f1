pub mod catalog;
pub mod learner;

pub use catalog::{CatalogError, GetCourseUseCase, ListCoursesUseCase};
pub use learner::{
    GetUserCourseUseCase, GetUserLessonUseCase, GetUserModuleUseCase, LearnerError,
    ListPurchasedCoursesUseCase,
};
