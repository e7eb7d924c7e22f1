use std::sync::Arc;
use uuid::Uuid;

use crate::modules::purchase::application::domain::{
    check_selection, distinct_ids, PricedCourse, SelectionError,
};
use crate::modules::purchase::application::ports::incoming::use_cases::PurchaseError;
use crate::modules::purchase::application::ports::outgoing::{
    PurchaseRepository, PurchaseRepositoryError,
};

impl From<PurchaseRepositoryError> for PurchaseError {
    fn from(err: PurchaseRepositoryError) -> Self {
        match err {
            PurchaseRepositoryError::NoModules(id) => SelectionError::NoModules(vec![id]).into(),
            PurchaseRepositoryError::AlreadyOwned(id) => {
                SelectionError::AlreadyPurchased(vec![id]).into()
            }
            PurchaseRepositoryError::DatabaseError(msg) => PurchaseError::RepositoryError(msg),
        }
    }
}

/// Validates a basket of course ids for a user. Shared by direct purchases and checkout.
#[derive(Clone)]
pub struct CourseSelector {
    repository: Arc<dyn PurchaseRepository + Send + Sync>,
}

impl CourseSelector {
    pub fn new(repository: Arc<dyn PurchaseRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    pub async fn select(
        &self,
        user_id: Uuid,
        course_ids: &[i32],
    ) -> Result<Vec<PricedCourse>, PurchaseError> {
        let ids = distinct_ids(course_ids);
        if ids.is_empty() {
            return Err(SelectionError::Empty.into());
        }

        let found = self.repository.priced_courses(&ids).await?;
        let owned = self.repository.owned_course_ids(user_id, &ids).await?;
        Ok(check_selection(&ids, found, &owned)?)
    }
}
