use std::sync::Arc;

use crate::modules::payment::application::ports::incoming::use_cases::{
    ApplyPaymentUpdateUseCase, CreatePaymentUseCase, GetPaymentStatusUseCase,
    VerifyWebhookUseCase,
};

#[derive(Clone)]
pub struct PaymentUseCases {
    pub create: Arc<dyn CreatePaymentUseCase + Send + Sync>,
    pub status: Arc<dyn GetPaymentStatusUseCase + Send + Sync>,
    pub verify_webhook: Arc<dyn VerifyWebhookUseCase + Send + Sync>,
    pub apply_update: Arc<dyn ApplyPaymentUpdateUseCase + Send + Sync>,
}
