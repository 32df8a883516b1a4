//! Outbound email delivery.
//!
//! All sends are fire-and-forget: the message is handed to a spawned task
//! and delivery failure is logged, never propagated to the operation that
//! triggered the email.

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// SMTP-backed mail sender.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    admin: String,
}

impl EmailService {
    /// Builds the relay transport for the configured SMTP host.
    pub fn new(
        host: &str,
        username: String,
        password: String,
        from: String,
        admin: String,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self {
            mailer,
            from,
            admin,
        })
    }

    /// Sends the password reset code to the user. Fire-and-forget.
    pub fn send_password_reset(&self, to: String, username: String, reset_code: String) {
        let body = build_password_reset_email(&username, &reset_code);
        self.dispatch(to, "Reset Your Wayshare Password".to_string(), body);
    }

    /// Relays a contact form submission to the admin mailbox. Fire-and-forget.
    pub fn send_contact_form(
        &self,
        from_name: String,
        from_email: String,
        subject: String,
        message: String,
    ) {
        let body = build_contact_form_email(&from_name, &from_email, &subject, &message);
        self.dispatch(
            self.admin.clone(),
            format!("New Contact Form - {}", subject),
            body,
        );
    }

    /// Spawns the actual delivery. Build or transport failures are logged and
    /// swallowed so the parent operation never fails on email problems.
    fn dispatch(&self, to: String, subject: String, html_body: String) {
        let mailer = self.mailer.clone();
        let from = self.from.clone();

        tokio::spawn(async move {
            let message = match build_message(&from, &to, &subject, html_body) {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!("Failed to build email to {}: {}", to, e);
                    return;
                }
            };

            match mailer.send(message).await {
                Ok(_) => tracing::info!("Email sent to {}", to),
                Err(e) => tracing::warn!("Failed to send email to {}: {}", to, e),
            }
        });
    }
}

fn build_message(
    from: &str,
    to: &str,
    subject: &str,
    html_body: String,
) -> Result<Message, Box<dyn std::error::Error + Send + Sync>> {
    Ok(Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html_body)?)
}

fn build_password_reset_email(username: &str, reset_code: &str) -> String {
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; color: #333;">
  <h2>Wayshare Password Reset</h2>
  <p>Hello <strong>{username}</strong>,</p>
  <p>We received a request to reset your password. Use the code below:</p>
  <p style="font-size: 32px; font-weight: bold; letter-spacing: 5px;">{reset_code}</p>
  <p><strong>This code will expire in 15 minutes.</strong></p>
  <p>If you didn't request this password reset, please ignore this email.
     Your password will remain unchanged.</p>
</body>
</html>"#
    )
}

fn build_contact_form_email(
    from_name: &str,
    from_email: &str,
    subject: &str,
    message: &str,
) -> String {
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; color: #333;">
  <h2>New Contact Form Submission</h2>
  <p><strong>From:</strong> {from_name}</p>
  <p><strong>Email:</strong> {from_email}</p>
  <p><strong>Subject:</strong> {subject}</p>
  <hr>
  <p>{}</p>
</body>
</html>"#,
        message.replace('\n', "<br>")
    )
}
