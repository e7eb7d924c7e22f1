use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{or_default, parsed, required, ConfigError};
use crate::modules::email::application::domain::OutgoingMail;
use crate::modules::email::application::ports::outgoing::{EmailSendError, EmailSender};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    /// Off for local catchers such as Mailpit.
    pub tls: bool,
}

impl SmtpConfig {
    /// `None` when `SMTP_HOST` is unset.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let host = or_default("SMTP_HOST", "");
        if host.trim().is_empty() {
            return Ok(None);
        }

        let non_empty = |key: &str| Some(or_default(key, "")).filter(|v| !v.is_empty());
        Ok(Some(Self {
            host,
            port: parsed::<u16>("SMTP_PORT", "587")?,
            username: non_empty("SMTP_USERNAME"),
            password: non_empty("SMTP_PASSWORD"),
            from: required("EMAIL_FROM")?,
            tls: parsed::<bool>("SMTP_TLS", "true")?,
        }))
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        Self {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    pub fn from_config(config: &SmtpConfig) -> Result<Self, EmailSendError> {
        let mut builder = if config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| EmailSendError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        }
        .port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self::new_with_mailer(
            Box::new(builder.build()),
            &config.from,
        ))
    }

    fn mailbox(address: &str) -> Result<Mailbox, EmailSendError> {
        address
            .parse::<Mailbox>()
            .map_err(|e| EmailSendError::InvalidAddress {
                address: address.to_string(),
                reason: e.to_string(),
            })
    }

    fn build(&self, mail: &OutgoingMail) -> Result<Message, EmailSendError> {
        let builder = Message::builder()
            .from(Self::mailbox(&self.from_email)?)
            .to(Self::mailbox(&mail.to)?)
            .subject(mail.subject.clone());

        let message = match (&mail.text, &mail.html) {
            (Some(text), Some(html)) => {
                builder.multipart(MultiPart::alternative_plain_html(text.clone(), html.clone()))
            }
            (None, Some(html)) => builder.header(ContentType::TEXT_HTML).body(html.clone()),
            (Some(text), None) => builder.header(ContentType::TEXT_PLAIN).body(text.clone()),
            (None, None) => return Err(EmailSendError::Build("message has no body".to_string())),
        };

        message.map_err(|e| EmailSendError::Build(e.to_string()))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), EmailSendError> {
        let message = self.build(mail)?;
        self.mailer
            .send(message)
            .await
            .map_err(EmailSendError::Transport)
    }
}
