// Email alerts. The collector only composes subject/body; delivery sits behind `Notifier`.

use crate::config::EmailConfig;
use crate::error::NotificationError;
use crate::models::Alert;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::instrument;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// Subject and plain-text body for an alert email.
pub fn compose_alert(agent_name: &str, alert: &Alert, observation: &str) -> (String, String) {
    let subject = format!(
        "{}: {} warning for {}",
        agent_name,
        alert.kind.label(),
        alert.source
    );
    let body = format!("{}\n\n{}", alert.message, observation);
    (subject, body)
}

/// SMTP over STARTTLS, authenticated as the sender address.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    to_address: String,
}

impl SmtpNotifier {
    pub fn from_config(config: &EmailConfig) -> Result<Self, NotificationError> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.from_address.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[instrument(skip(self, body), fields(notifier = "smtp", operation = "notify"))]
    async fn notify(&self, subject: &str, body: &str) -> Result<(), NotificationError> {
        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(self.to_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        self.mailer.send(message).await?;
        Ok(())
    }
}
