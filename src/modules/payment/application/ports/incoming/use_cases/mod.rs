pub mod payments;

pub use payments::{
    ApplyPaymentUpdateUseCase, CheckoutSession, CreatePaymentUseCase, GetPaymentStatusUseCase,
    PaymentError, VerifyWebhookUseCase,
};
