use clap::Subcommand;
use contact_relay_config::Config;
use contact_relay_email_contracts::{ContentType, Email, EmailService};
use contact_relay_models::email_address::EmailAddress;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddress },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    email_service
        .send(Email {
            recipient: recipient.clone(),
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    info!(%recipient, "Test email sent");

    Ok(())
}
