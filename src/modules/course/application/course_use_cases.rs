use std::sync::Arc;

use crate::modules::course::application::ports::incoming::use_cases::{
    GetCourseUseCase, GetUserCourseUseCase, GetUserLessonUseCase, GetUserModuleUseCase,
    ListCoursesUseCase, ListPurchasedCoursesUseCase,
};

#[derive(Clone)]
pub struct CourseUseCases {
    pub list: Arc<dyn ListCoursesUseCase + Send + Sync>,
    pub get: Arc<dyn GetCourseUseCase + Send + Sync>,
    pub purchased: Arc<dyn ListPurchasedCoursesUseCase + Send + Sync>,
    pub user_course: Arc<dyn GetUserCourseUseCase + Send + Sync>,
    pub user_module: Arc<dyn GetUserModuleUseCase + Send + Sync>,
    pub user_lesson: Arc<dyn GetUserLessonUseCase + Send + Sync>,
}
