use std::sync::Arc;

use crate::modules::email::application::ports::incoming::use_cases::SendMailUseCase;

#[derive(Clone)]
pub struct MailUseCases {
    pub send: Arc<dyn SendMailUseCase + Send + Sync>,
}
