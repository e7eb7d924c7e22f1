pub mod reset_link_mailer;
pub mod send_mail_service;

pub use reset_link_mailer::ResetLinkMailer;
pub use send_mail_service::SendMailService;
