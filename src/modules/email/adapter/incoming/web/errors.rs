use crate::modules::email::application::ports::incoming::use_cases::MailError;
use crate::shared::api::AppError;

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::Validation(errors) => AppError::Validation {
                message: "Validation failed".to_string(),
                errors,
            },
            MailError::Delivery(msg) => AppError::ServiceUnavailable {
                code: "MAIL_DELIVERY_FAILED",
                message: msg,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, ResponseError};

    #[test]
    fn test_delivery_failure_is_503() {
        let err = AppError::from(MailError::Delivery("timeout".into()));

        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
