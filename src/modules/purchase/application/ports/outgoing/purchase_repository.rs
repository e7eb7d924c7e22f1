use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::purchase::application::domain::{PaymentReference, PricedCourse, Purchase};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PurchaseRepositoryError {
    #[error("Course {0} has no modules")]
    NoModules(i32),

    #[error("Course {0} is already purchased")]
    AlreadyOwned(i32),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Courses among `course_ids` that exist, with price and module count.
    async fn priced_courses(
        &self,
        course_ids: &[i32],
    ) -> Result<Vec<PricedCourse>, PurchaseRepositoryError>;

    /// Subset of `course_ids` the user already owns.
    async fn owned_course_ids(
        &self,
        user_id: Uuid,
        course_ids: &[i32],
    ) -> Result<Vec<i32>, PurchaseRepositoryError>;

    /// Creates one purchase per course and enrolls the user, all or nothing.
    async fn purchase(
        &self,
        user_id: Uuid,
        courses: &[PricedCourse],
        reference: PaymentReference,
    ) -> Result<Vec<Purchase>, PurchaseRepositoryError>;
}
