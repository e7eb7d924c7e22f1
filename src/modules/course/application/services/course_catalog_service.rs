use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::course::application::domain::{Course, CourseDetail};
use crate::modules::course::application::ports::incoming::use_cases::{
    CatalogError, GetCourseUseCase, ListCoursesUseCase,
};
use crate::modules::course::application::ports::outgoing::{CourseQuery, CourseQueryError};

impl From<CourseQueryError> for CatalogError {
    fn from(err: CourseQueryError) -> Self {
        match err {
            CourseQueryError::DatabaseError(msg) => CatalogError::RepositoryError(msg),
        }
    }
}

pub struct CourseCatalogService {
    query: Arc<dyn CourseQuery + Send + Sync>,
}

impl CourseCatalogService {
    pub fn new(query: Arc<dyn CourseQuery + Send + Sync>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ListCoursesUseCase for CourseCatalogService {
    async fn execute(&self) -> Result<Vec<Course>, CatalogError> {
        Ok(self.query.list_courses().await?)
    }
}

#[async_trait]
impl GetCourseUseCase for CourseCatalogService {
    async fn execute(&self, course_id: i32) -> Result<CourseDetail, CatalogError> {
        self.query
            .course_detail(course_id)
            .await?
            .ok_or(CatalogError::NotFound)
    }
}
