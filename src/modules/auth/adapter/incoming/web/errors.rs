use tracing::error;

use crate::modules::auth::application::ports::incoming::use_cases::{
    LoginError, LogoutError, PasswordResetError, RefreshTokenError, RegisterUserError,
};
use crate::shared::api::AppError;

impl From<RegisterUserError> for AppError {
    fn from(err: RegisterUserError) -> Self {
        match err {
            RegisterUserError::Validation(errors) => AppError::Validation {
                message: "Validation failed".to_string(),
                errors,
            },
            RegisterUserError::EmailAlreadyExists => AppError::conflict(
                "EMAIL_ALREADY_EXISTS",
                "User with this email already exists",
            ),
            RegisterUserError::RepositoryError(msg) => AppError::Database(msg),
            RegisterUserError::HashingFailed(msg)
            | RegisterUserError::TokenGenerationFailed(msg) => AppError::Internal(msg),
        }
    }
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::MissingCredentials => {
                AppError::bad_request("VALIDATION_ERROR", err.to_string())
            }
            LoginError::InvalidCredentials => {
                AppError::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
            }
            LoginError::RepositoryError(msg) => AppError::Database(msg),
            LoginError::PasswordVerificationFailed(msg)
            | LoginError::TokenGenerationFailed(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RefreshTokenError> for AppError {
    fn from(err: RefreshTokenError) -> Self {
        match err {
            RefreshTokenError::MissingToken => {
                AppError::unauthorized("MISSING_REFRESH_TOKEN", "Refresh token is required")
            }
            RefreshTokenError::InvalidToken | RefreshTokenError::UserNotFound => {
                AppError::unauthorized("INVALID_REFRESH_TOKEN", "Invalid or expired refresh token")
            }
            RefreshTokenError::RepositoryError(msg) => AppError::Database(msg),
            RefreshTokenError::TokenGenerationFailed(msg) => AppError::Internal(msg),
        }
    }
}

impl From<LogoutError> for AppError {
    fn from(err: LogoutError) -> Self {
        match err {
            LogoutError::RepositoryError(msg) => AppError::Database(msg),
        }
    }
}

impl From<PasswordResetError> for AppError {
    fn from(err: PasswordResetError) -> Self {
        match err {
            PasswordResetError::Validation(errors) => AppError::Validation {
                message: "Validation failed".to_string(),
                errors,
            },
            PasswordResetError::InvalidToken => {
                AppError::bad_request("INVALID_RESET_TOKEN", "Invalid or expired reset token")
            }
            PasswordResetError::NotificationFailed(msg) => {
                error!(error = %msg, "Reset email delivery failed");
                AppError::ServiceUnavailable {
                    code: "EMAIL_DELIVERY_FAILED",
                    message: "Failed to send the password reset email".to_string(),
                }
            }
            PasswordResetError::RepositoryError(msg) => AppError::Database(msg),
            PasswordResetError::TokenGenerationFailed(msg)
            | PasswordResetError::HashingFailed(msg) => AppError::Internal(msg),
        }
    }
}
