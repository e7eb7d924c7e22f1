pub mod payment_gateway;
pub mod payment_repository;

pub use payment_gateway::{GatewayError, PaymentGateway};
pub use payment_repository::{PaymentRepository, PaymentRepositoryError};
