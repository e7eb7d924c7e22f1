pub mod mail;
pub mod templates;

pub use mail::{MailDraft, OutgoingMail};
pub use templates::reset_link_mail;
