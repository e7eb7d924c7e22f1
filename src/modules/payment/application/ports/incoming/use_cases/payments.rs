use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::payment::application::domain::{InvoiceStatusUpdate, Payment, UpdateOutcome};
use crate::modules::purchase::application::domain::SelectionError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Payment not found")]
    NotFound,

    #[error("Missing X-Sign header")]
    MissingSignature,

    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Payment provider error: {0}")]
    Gateway(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// What the buyer needs to go and pay.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub invoice_id: String,
    pub page_url: String,
    /// Kopiyky.
    pub amount: i64,
}

#[async_trait]
pub trait CreatePaymentUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, course_ids: Vec<i32>)
        -> Result<CheckoutSession, PaymentError>;
}

#[async_trait]
pub trait GetPaymentStatusUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, invoice_id: String) -> Result<Payment, PaymentError>;
}

/// Authenticates a webhook delivery and decodes it.
#[async_trait]
pub trait VerifyWebhookUseCase: Send + Sync {
    async fn execute(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<InvoiceStatusUpdate, PaymentError>;
}

#[async_trait]
pub trait ApplyPaymentUpdateUseCase: Send + Sync {
    async fn execute(&self, update: InvoiceStatusUpdate) -> Result<UpdateOutcome, PaymentError>;
}
