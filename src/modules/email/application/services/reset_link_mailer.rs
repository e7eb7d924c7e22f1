use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::auth::application::ports::outgoing::{
    PasswordResetNotifier, ResetNotificationError,
};
use crate::modules::email::application::domain::reset_link_mail;
use crate::modules::email::application::ports::outgoing::EmailSender;

/// Sends password reset links through the configured mail transport.
pub struct ResetLinkMailer {
    sender: Arc<dyn EmailSender + Send + Sync>,
}

impl ResetLinkMailer {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl PasswordResetNotifier for ResetLinkMailer {
    async fn send_reset_link(
        &self,
        to: &str,
        name: &str,
        reset_link: &str,
    ) -> Result<(), ResetNotificationError> {
        self.sender
            .send(&reset_link_mail(to, name, reset_link))
            .await
            .map_err(|e| ResetNotificationError(e.to_string()))
    }
}
