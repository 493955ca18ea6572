use anyhow::Context;
use contact_relay_config::EmailConfig;
use contact_relay_email_impl::EmailServiceImpl;

/// Set up the transport for the SMTP relay
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(
        &config.smtp_url,
        config.from.clone(),
        config.password.as_ref().map(|password| password.0.as_str()),
    )
    .context("Failed to set up SMTP transport")
}
