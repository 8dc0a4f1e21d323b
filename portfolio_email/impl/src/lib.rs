use std::time::Duration;

use anyhow::{anyhow, Context};
use lettre::{
    message::{header, MessageBuilder},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use portfolio_email_contracts::{Email, EmailService};
use portfolio_models::{email_address::EmailAddressWithName, Sensitive};
use portfolio_utils::Apply;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    pub host: String,
    pub port: u16,
    pub tls: SmtpTls,
    pub credentials: Option<SmtpCredentials>,
    pub timeout: Duration,
    /// The identity every outgoing email is sent from.
    pub from: EmailAddressWithName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    /// Plain text connection. Only suitable for local relays.
    None,
    StartTls,
    /// Implicit TLS (smtps).
    Tls,
}

#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: Sensitive<String>,
}

impl EmailServiceImpl {
    /// Configure the smtp transport. No connection is established here.
    pub async fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        let builder = match config.tls {
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
            SmtpTls::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            }
            SmtpTls::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
        };

        let transport = builder
            .port(config.port)
            .timeout(Some(config.timeout))
            .apply_map(config.credentials, |builder, credentials| {
                builder.credentials(Credentials::new(
                    credentials.username,
                    credentials.password.0,
                ))
            })
            .build();

        Ok(Self {
            from: config.from,
            transport,
        })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(email.body)
            .context("Failed to build email message")
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .context("Failed to send email")?;

        debug!(code = %response.code(), "smtp server accepted the email");

        Ok(response.is_positive())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
