pub mod templates;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::models::Submission;

/// Delivers the operator notification for a stored submission.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_notification(&self, submission: &Submission) -> Result<(), String>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP starttls error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        let from = Mailbox::new(
            Some(config.brand.clone()),
            config
                .user
                .parse()
                .map_err(|e| format!("Invalid from address: {e}"))?,
        );
        let to = config
            .to
            .parse()
            .map_err(|e| format!("Invalid operator address: {e}"))?;

        Ok(Self { transport, from, to })
    }
}

/// Build the notification message without sending it.
pub fn build_notification(
    from: &Mailbox,
    to: &Mailbox,
    submission: &Submission,
) -> Result<Message, String> {
    let reply_to: Mailbox = submission
        .email
        .parse()
        .map_err(|e| format!("Invalid reply-to address: {e}"))?;

    Message::builder()
        .from(from.clone())
        .reply_to(reply_to)
        .to(to.clone())
        .subject(templates::subject(&submission.name))
        .multipart(MultiPart::alternative_plain_html(
            templates::render_notification_text(submission)?,
            templates::render_notification_html(submission)?,
        ))
        .map_err(|e| format!("Failed to build email: {e}"))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_notification(&self, submission: &Submission) -> Result<(), String> {
        let message = build_notification(&self.from, &self.to, submission)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}
