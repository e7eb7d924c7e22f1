use crate::modules::payment::application::ports::incoming::use_cases::PaymentError;
use crate::shared::api::AppError;

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Selection(e) => e.into(),
            PaymentError::NotFound => AppError::not_found("PAYMENT_NOT_FOUND", err.to_string()),
            PaymentError::MissingSignature => {
                AppError::bad_request("MISSING_SIGNATURE", err.to_string())
            }
            PaymentError::InvalidSignature => {
                AppError::unauthorized("INVALID_SIGNATURE", err.to_string())
            }
            PaymentError::InvalidPayload(_) => {
                AppError::bad_request("INVALID_WEBHOOK_PAYLOAD", err.to_string())
            }
            PaymentError::Gateway(msg) => AppError::BadGateway(msg),
            PaymentError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}
