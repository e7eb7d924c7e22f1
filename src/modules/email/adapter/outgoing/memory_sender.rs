use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

use crate::modules::email::application::domain::OutgoingMail;
use crate::modules::email::application::ports::outgoing::{EmailSendError, EmailSender};

/// Keeps messages in memory instead of delivering them. Used when no SMTP host is configured.
#[derive(Default)]
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl InMemoryEmailSender {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailSender for InMemoryEmailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), EmailSendError> {
        info!(to = %mail.to, subject = %mail.subject, "mail captured, not delivered");
        self.sent
            .lock()
            .map_err(|e| EmailSendError::Transport(e.to_string()))?
            .push(mail.clone());
        Ok(())
    }
}
