//! Email transports

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use radar_common::SmtpConfig;
use tracing::instrument;

use crate::error::{IntegrationError, IntegrationResult};

/// A rendered HTML email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// What a mailer did with a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the mail server
    Sent,
    /// Only written to the log
    Logged,
}

impl Delivery {
    #[inline]
    pub fn is_sent(self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Outbound email delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> IntegrationResult<Delivery>;
}

/// SMTP delivery with STARTTLS
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> IntegrationResult<Self> {
        let (Some(username), Some(password)) = (&config.username, &config.password) else {
            return Err(IntegrationError::Config(
                "SMTP credentials are not set".to_string(),
            ));
        };

        let from = config
            .from_email
            .parse::<Mailbox>()
            .map_err(|e| IntegrationError::Config(format!("FROM_EMAIL: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| IntegrationError::Config(format!("SMTP relay: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(username.clone(), password.clone()))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    async fn send(&self, message: &EmailMessage) -> IntegrationResult<Delivery> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| IntegrationError::Mail(format!("recipient: {e}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|e| IntegrationError::Mail(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| IntegrationError::Mail(e.to_string()))?;

        tracing::info!("Email sent");
        Ok(Delivery::Sent)
    }
}

/// Used when SMTP is not configured: records the email in the log instead
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> IntegrationResult<Delivery> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Email skipped (no SMTP config)"
        );
        Ok(Delivery::Logged)
    }
}

/// SMTP mailer when credentials are configured, log mailer otherwise
pub fn mailer_from_config(config: &SmtpConfig) -> IntegrationResult<Arc<dyn Mailer>> {
    if config.is_configured() {
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        tracing::warn!("SMTP credentials missing, notification emails will only be logged");
        Ok(Arc::new(LogMailer))
    }
}
