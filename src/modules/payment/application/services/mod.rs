pub mod payment_service;
pub mod webhook_service;

pub use payment_service::PaymentService;
pub use webhook_service::WebhookService;
