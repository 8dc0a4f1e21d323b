use anyhow::ensure;
use clap::Subcommand;
use portfolio_config::Config;
use portfolio_email_contracts::{Email, EmailService};
use portfolio_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test {
        /// Defaults to the contact recipient
        recipient: Option<EmailAddressWithName>,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: Option<EmailAddressWithName>) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email).await?;
    let recipient = recipient.unwrap_or(config.contact.recipient);

    info!(%recipient, "Sending test email");
    let ok = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    info!("Test email has been sent");
    Ok(())
}
