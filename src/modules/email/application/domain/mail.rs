use crate::shared::api::FieldErrors;

/// A message ready for delivery. At least one of the bodies is present.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
}

/// Unchecked mail as submitted by an administrator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MailDraft {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl MailDraft {
    pub fn validate(self) -> Result<OutgoingMail, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut fail = |field: &str, msg: &str| {
            errors
                .entry(field.to_string())
                .or_default()
                .push(msg.to_string());
        };

        let to = present(self.to).map(|t| t.trim().to_string());
        if to.is_none() {
            fail("to", "Recipient is required");
        }
        let subject = present(self.subject);
        if subject.is_none() {
            fail("subject", "Subject is required");
        }
        let text = present(self.text);
        let html = present(self.html);
        if text.is_none() && html.is_none() {
            fail("text", "Either text or html body is required");
        }

        match (to, subject) {
            (Some(to), Some(subject)) if errors.is_empty() => Ok(OutgoingMail {
                to,
                subject,
                text,
                html,
            }),
            _ => Err(errors),
        }
    }
}
