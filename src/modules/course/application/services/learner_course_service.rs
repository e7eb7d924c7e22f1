use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::course::application::domain::{
    PurchasedCourse, UserCourseView, UserLessonView, UserModuleView,
};
use crate::modules::course::application::ports::incoming::use_cases::{
    GetUserCourseUseCase, GetUserLessonUseCase, GetUserModuleUseCase, LearnerError,
    ListPurchasedCoursesUseCase,
};
use crate::modules::course::application::ports::outgoing::{CourseQuery, CourseQueryError};

impl From<CourseQueryError> for LearnerError {
    fn from(err: CourseQueryError) -> Self {
        match err {
            CourseQueryError::DatabaseError(msg) => LearnerError::RepositoryError(msg),
        }
    }
}

/// Learner-facing course views. Content is only shown to owners of the course.
pub struct LearnerCourseService {
    query: Arc<dyn CourseQuery + Send + Sync>,
}

impl LearnerCourseService {
    pub fn new(query: Arc<dyn CourseQuery + Send + Sync>) -> Self {
        Self { query }
    }
}

fn owned<T>(
    view: Option<T>,
    missing: LearnerError,
    purchased: impl Fn(&T) -> bool,
) -> Result<T, LearnerError> {
    let view = view.ok_or(missing)?;
    if !purchased(&view) {
        return Err(LearnerError::NotPurchased);
    }
    Ok(view)
}

#[async_trait]
impl ListPurchasedCoursesUseCase for LearnerCourseService {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<PurchasedCourse>, LearnerError> {
        Ok(self.query.purchased_courses(user_id).await?)
    }
}

#[async_trait]
impl GetUserCourseUseCase for LearnerCourseService {
    async fn execute(&self, user_id: Uuid, course_id: i32) -> Result<UserCourseView, LearnerError> {
        let view = self.query.user_course(user_id, course_id).await?;
        owned(view, LearnerError::CourseNotFound, |v| v.has_purchased)
    }
}

#[async_trait]
impl GetUserModuleUseCase for LearnerCourseService {
    async fn execute(&self, user_id: Uuid, module_id: i32) -> Result<UserModuleView, LearnerError> {
        let view = self.query.user_module(user_id, module_id).await?;
        owned(view, LearnerError::ModuleNotFound, |v| v.has_purchased)
    }
}

#[async_trait]
impl GetUserLessonUseCase for LearnerCourseService {
    async fn execute(&self, user_id: Uuid, lesson_id: i32) -> Result<UserLessonView, LearnerError> {
        let view = self.query.user_lesson(user_id, lesson_id).await?;
        owned(view, LearnerError::LessonNotFound, |v| v.has_purchased)
    }
}
