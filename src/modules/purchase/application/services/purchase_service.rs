use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::modules::purchase::application::domain::Purchase;
use crate::modules::purchase::application::ports::incoming::use_cases::{
    PurchaseCoursesUseCase, PurchaseError, PurchaseRequest,
};
use crate::modules::purchase::application::ports::outgoing::PurchaseRepository;

use super::CourseSelector;

pub struct PurchaseService {
    selector: CourseSelector,
    repository: Arc<dyn PurchaseRepository + Send + Sync>,
}

impl PurchaseService {
    pub fn new(repository: Arc<dyn PurchaseRepository + Send + Sync>) -> Self {
        Self {
            selector: CourseSelector::new(repository.clone()),
            repository,
        }
    }
}

#[async_trait]
impl PurchaseCoursesUseCase for PurchaseService {
    async fn execute(
        &self,
        user_id: Uuid,
        request: PurchaseRequest,
    ) -> Result<Vec<Purchase>, PurchaseError> {
        let courses = self.selector.select(user_id, &request.course_ids).await?;
        let purchases = self
            .repository
            .purchase(user_id, &courses, request.reference)
            .await?;

        info!(
            user_id = %user_id,
            courses = ?purchases.iter().map(|p| p.course_id).collect::<Vec<_>>(),
            "courses purchased"
        );
        Ok(purchases)
    }
}
