use async_trait::async_trait;

use crate::modules::payment::application::domain::{
    InvoiceStatusUpdate, NewPayment, Payment, UpdateOutcome,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: NewPayment) -> Result<Payment, PaymentRepositoryError>;

    async fn find_by_invoice(&self, invoice_id: &str)
        -> Result<Option<Payment>, PaymentRepositoryError>;

    /// Writes the update only when its `modified_date` is strictly newer than the stored one.
    /// The first applied move to success also creates the purchases, in the same transaction.
    async fn apply_update(
        &self,
        update: &InvoiceStatusUpdate,
    ) -> Result<UpdateOutcome, PaymentRepositoryError>;
}
