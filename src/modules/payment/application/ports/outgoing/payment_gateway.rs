use async_trait::async_trait;

use crate::modules::payment::application::domain::{
    CreatedInvoice, InvoiceRequest, InvoiceStatusUpdate,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("Payment provider request failed: {0}")]
    Request(String),

    #[error("Payment provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected payment provider response: {0}")]
    Decode(String),
}

/// The acquiring API: invoices, their status and the webhook signing key.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_invoice(&self, invoice: &InvoiceRequest) -> Result<CreatedInvoice, GatewayError>;

    async fn invoice_status(&self, invoice_id: &str) -> Result<InvoiceStatusUpdate, GatewayError>;

    /// Base64 of the PEM public key that signs webhook deliveries.
    async fn public_key(&self) -> Result<String, GatewayError>;
}
