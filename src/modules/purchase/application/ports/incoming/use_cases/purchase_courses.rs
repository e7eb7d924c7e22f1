use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::purchase::application::domain::{PaymentReference, Purchase, SelectionError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PurchaseError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    pub course_ids: Vec<i32>,
    pub reference: PaymentReference,
}

#[async_trait]
pub trait PurchaseCoursesUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        request: PurchaseRequest,
    ) -> Result<Vec<Purchase>, PurchaseError>;
}
