use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::modules::payment::application::domain::{verify_signature, InvoiceStatusUpdate};
use crate::modules::payment::application::ports::incoming::use_cases::{
    PaymentError, VerifyWebhookUseCase,
};
use crate::modules::payment::application::ports::outgoing::PaymentGateway;

pub struct WebhookService {
    gateway: Arc<dyn PaymentGateway + Send + Sync>,
}

impl WebhookService {
    pub fn new(gateway: Arc<dyn PaymentGateway + Send + Sync>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl VerifyWebhookUseCase for WebhookService {
    async fn execute(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<InvoiceStatusUpdate, PaymentError> {
        let signature = signature
            .filter(|s| !s.trim().is_empty())
            .ok_or(PaymentError::MissingSignature)?;

        let key = self.gateway.public_key().await?;
        let valid = verify_signature(&key, body, signature)
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;
        if !valid {
            warn!(body_len = body.len(), "webhook signature rejected");
            return Err(PaymentError::InvalidSignature);
        }

        serde_json::from_slice(body).map_err(|e| PaymentError::InvalidPayload(e.to_string()))
    }
}
