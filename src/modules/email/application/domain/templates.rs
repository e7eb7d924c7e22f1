use super::mail::OutgoingMail;

pub const RESET_SUBJECT: &str = "Password reset";

/// The password reset message, in plain text and HTML.
pub fn reset_link_mail(to: &str, name: &str, link: &str) -> OutgoingMail {
    let text = format!(
        "Hello, {name}!\n\n\
         We received a request to reset your password. Open the link below to choose a new one:\n\
         {link}\n\n\
         The link expires in one hour. If you did not ask for a reset, ignore this email."
    );
    let html = format!(
        r#"<p>Hello, {name}!</p>
<p>We received a request to reset your password. Click the button below to choose a new one.</p>
<p><a href="{link}" style="display:inline-block;padding:12px 24px;background:#111;color:#fff;text-decoration:none;border-radius:6px">Reset password</a></p>
<p>If the button does not work, copy this link into your browser:<br>{link}</p>
<p>The link expires in one hour. If you did not ask for a reset, ignore this email.</p>"#,
        name = html_escape(name),
        link = html_escape(link),
    );

    OutgoingMail {
        to: to.to_string(),
        subject: RESET_SUBJECT.to_string(),
        text: Some(text),
        html: Some(html),
    }
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
