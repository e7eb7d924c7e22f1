use async_trait::async_trait;

use crate::modules::email::application::domain::MailDraft;
use crate::shared::api::FieldErrors;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MailError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    Delivery(String),
}

#[async_trait]
pub trait SendMailUseCase: Send + Sync {
    async fn execute(&self, draft: MailDraft) -> Result<(), MailError>;
}
