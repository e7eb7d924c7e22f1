use async_trait::async_trait;

use crate::shared::api::FieldErrors;

pub const RESET_PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PasswordResetError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Invalid or expired reset token")]
    InvalidToken,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Email delivery failed: {0}")]
    NotificationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl PasswordResetError {
    fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        PasswordResetError::Validation(errors)
    }
}

#[derive(Debug, Clone)]
pub struct RequestPasswordResetCommand {
    email: String,
    client_url: String,
}

impl RequestPasswordResetCommand {
    pub fn new(email: String, client_url: String) -> Result<Self, PasswordResetError> {
        let email = email.trim().to_lowercase();
        if !email_address::EmailAddress::is_valid(&email) {
            return Err(PasswordResetError::field("email", "Invalid email format"));
        }
        let client_url = client_url.trim().trim_end_matches('/').to_string();
        if client_url.is_empty() {
            return Err(PasswordResetError::field("clientUrl", "Client URL is required"));
        }
        Ok(Self { email, client_url })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn client_url(&self) -> &str {
        &self.client_url
    }
}

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    token: String,
    password: String,
}

impl ResetPasswordCommand {
    pub fn new(
        token: String,
        password: String,
        confirm_password: String,
    ) -> Result<Self, PasswordResetError> {
        let mut errors = FieldErrors::new();

        if token.trim().is_empty() {
            errors.insert("token".to_string(), vec!["Token is required".to_string()]);
        }
        if password.chars().count() < RESET_PASSWORD_MIN_LEN {
            errors.insert(
                "password".to_string(),
                vec!["Password must be at least 6 characters".to_string()],
            );
        }
        if password != confirm_password {
            errors.insert(
                "confirmPassword".to_string(),
                vec!["Passwords do not match".to_string()],
            );
        }

        if !errors.is_empty() {
            return Err(PasswordResetError::Validation(errors));
        }

        Ok(Self {
            token: token.trim().to_string(),
            password,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetTokenStatus {
    pub email: String,
}

#[async_trait]
pub trait RequestPasswordResetUseCase: Send + Sync {
    /// Succeeds for unknown emails too, so callers cannot probe for accounts.
    async fn execute(&self, command: RequestPasswordResetCommand)
        -> Result<(), PasswordResetError>;
}

#[async_trait]
pub trait VerifyResetTokenUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<ResetTokenStatus, PasswordResetError>;
}

#[async_trait]
pub trait ResetPasswordUseCase: Send + Sync {
    async fn execute(&self, command: ResetPasswordCommand) -> Result<(), PasswordResetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_command_reports_mismatch_and_length() {
        let err = ResetPasswordCommand::new("t".into(), "abc".into(), "abd".into()).unwrap_err();

        let PasswordResetError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.contains_key("password"));
        assert!(errors.contains_key("confirmPassword"));
    }

    #[test]
    fn test_request_command_trims_client_url() {
        let cmd = RequestPasswordResetCommand::new(
            "User@Example.com".into(),
            "https://app.example.com/".into(),
        )
        .unwrap();

        assert_eq!(cmd.email(), "user@example.com");
        assert_eq!(cmd.client_url(), "https://app.example.com");
    }
}
