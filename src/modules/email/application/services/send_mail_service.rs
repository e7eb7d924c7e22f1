use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::modules::email::application::domain::MailDraft;
use crate::modules::email::application::ports::incoming::use_cases::{MailError, SendMailUseCase};
use crate::modules::email::application::ports::outgoing::EmailSender;

pub struct SendMailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
}

impl SendMailService {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl SendMailUseCase for SendMailService {
    async fn execute(&self, draft: MailDraft) -> Result<(), MailError> {
        let mail = draft.validate().map_err(MailError::Validation)?;

        self.sender.send(&mail).await.map_err(|e| {
            error!(to = %mail.to, error = %e, "mail delivery failed");
            MailError::Delivery(e.to_string())
        })?;

        info!(to = %mail.to, subject = %mail.subject, "mail sent");
        Ok(())
    }
}
