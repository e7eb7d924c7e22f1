pub mod memory_sender;
pub mod smtp_sender;

pub use memory_sender::InMemoryEmailSender;
pub use smtp_sender::{SmtpConfig, SmtpEmailSender};
