pub mod send_mail;

pub use send_mail::{MailError, SendMailUseCase};
