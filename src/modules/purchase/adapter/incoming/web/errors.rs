use serde_json::json;

use crate::modules::purchase::application::domain::SelectionError;
use crate::modules::purchase::application::ports::incoming::use_cases::PurchaseError;
use crate::shared::api::AppError;

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::Empty => AppError::validation("courseIds", err.to_string()),
            SelectionError::NotFound(ref ids) => {
                AppError::not_found("COURSE_NOT_FOUND", err.to_string())
                    .with_details(json!({ "courseIds": ids }))
            }
            SelectionError::AlreadyPurchased(ref ids) => {
                AppError::bad_request("ALREADY_PURCHASED", err.to_string())
                    .with_details(json!({ "courseIds": ids }))
            }
            SelectionError::NoModules(ref ids) => {
                AppError::bad_request("COURSE_HAS_NO_MODULES", err.to_string())
                    .with_details(json!({ "courseIds": ids }))
            }
        }
    }
}

impl From<PurchaseError> for AppError {
    fn from(err: PurchaseError) -> Self {
        match err {
            PurchaseError::Selection(e) => e.into(),
            PurchaseError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, ResponseError};

    #[test]
    fn test_selection_status_codes() {
        let cases = [
            (SelectionError::Empty, StatusCode::BAD_REQUEST),
            (SelectionError::NotFound(vec![5]), StatusCode::NOT_FOUND),
            (SelectionError::AlreadyPurchased(vec![1]), StatusCode::BAD_REQUEST),
            (SelectionError::NoModules(vec![2]), StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }
}
