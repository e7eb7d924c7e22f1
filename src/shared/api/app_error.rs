// src/shared/api/app_error.rs
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::Value;
use tracing::error;

use crate::shared::api::{ApiResponse, FieldErrors};

/// Single translation point from application failures to HTTP responses.
///
/// Module-level use case errors convert into this type (see each module's
/// `adapter::incoming::web::errors`), handlers return `Result<HttpResponse, AppError>`
/// and actix renders the envelope through [`ResponseError`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },

    #[error("{message}")]
    BadRequest {
        code: &'static str,
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    #[error("{message}")]
    Forbidden { code: &'static str, message: String },

    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    #[error("{field} is already taken")]
    UniqueViolation { field: String },

    #[error("upstream error: {0}")]
    BadGateway(String),

    #[error("{message}")]
    ServiceUnavailable { code: &'static str, message: String },

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.clone()]);
        AppError::Validation { message, errors }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        AppError::BadRequest {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Forbidden {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        AppError::NotFound {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Conflict {
            code,
            message: message.into(),
        }
    }

    /// Attach a JSON payload to a 400 or 404; other variants are returned unchanged.
    pub fn with_details(self, value: Value) -> Self {
        match self {
            AppError::BadRequest { code, message, .. } => AppError::BadRequest {
                code,
                message,
                details: Some(value),
            },
            AppError::NotFound { code, message, .. } => AppError::NotFound {
                code,
                message,
                details: Some(value),
            },
            other => other,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } | AppError::UniqueViolation { .. } => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::Validation { message, errors } => {
                ApiResponse::validation_failed(message, errors)
            }
            AppError::BadRequest {
                code,
                message,
                details,
            }
            | AppError::NotFound {
                code,
                message,
                details,
            } => ApiResponse::error_with_details(status, code, message, details.clone()),
            AppError::Unauthorized { code, message }
            | AppError::Forbidden { code, message }
            | AppError::Conflict { code, message } => ApiResponse::error(status, code, message),
            AppError::UniqueViolation { .. } => {
                ApiResponse::error(status, "ALREADY_EXISTS", &self.to_string())
            }
            AppError::BadGateway(msg) => {
                error!(error = %msg, "Upstream service failed");
                ApiResponse::error(
                    status,
                    "PAYMENT_PROVIDER_ERROR",
                    "Payment provider is unavailable",
                )
            }
            AppError::ServiceUnavailable { code, message } => {
                error!(code = %code, "{}", message);
                ApiResponse::error(status, code, message)
            }
            AppError::Database(msg) => {
                error!(error = %msg, "Database error");
                ApiResponse::error(status, "DATABASE_ERROR", "Database error")
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "Internal error");
                ApiResponse::internal_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::json;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_validation_error_carries_field_map() {
        let (status, body) = body_json(AppError::validation("password", "too short")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"]["password"][0], "too short");
    }

    #[actix_web::test]
    async fn test_unique_violation_names_field() {
        let (status, body) = body_json(AppError::UniqueViolation {
            field: "email".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "email is already taken");
    }

    #[actix_web::test]
    async fn test_database_error_is_sanitized() {
        let (status, body) =
            body_json(AppError::Database("relation \"x\" does not exist".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "Database error");
    }

    #[actix_web::test]
    async fn test_not_found_with_details() {
        let err = AppError::not_found("COURSES_NOT_FOUND", "Some courses were not found")
            .with_details(json!({ "missingIds": [4, 9] }));
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["details"]["missingIds"], json!([4, 9]));
    }

    #[actix_web::test]
    async fn test_internal_error_hides_message() {
        let (status, body) = body_json(AppError::Internal("boom".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }
}
