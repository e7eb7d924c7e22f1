use std::sync::Arc;

use crate::modules::review::application::ports::incoming::use_cases::{
    CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase, ListCourseReviewsUseCase,
    ListReviewsUseCase, UpdateReviewUseCase,
};

#[derive(Clone)]
pub struct ReviewUseCases {
    pub list: Arc<dyn ListReviewsUseCase + Send + Sync>,
    pub list_for_course: Arc<dyn ListCourseReviewsUseCase + Send + Sync>,
    pub get: Arc<dyn GetReviewUseCase + Send + Sync>,
    pub create: Arc<dyn CreateReviewUseCase + Send + Sync>,
    pub update: Arc<dyn UpdateReviewUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteReviewUseCase + Send + Sync>,
}

