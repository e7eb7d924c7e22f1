use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Failed to send password reset email: {0}")]
pub struct ResetNotificationError(pub String);

/// Delivers the reset link to the account owner.
#[async_trait]
pub trait PasswordResetNotifier: Send + Sync {
    async fn send_reset_link(
        &self,
        to: &str,
        name: &str,
        reset_link: &str,
    ) -> Result<(), ResetNotificationError>;
}
