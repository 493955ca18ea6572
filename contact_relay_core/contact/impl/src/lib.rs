use std::sync::Arc;

use contact_relay_core_contact_contracts::{ContactSendMessageError, ContactService};
use contact_relay_email_contracts::{ContentType, Email, EmailService};
use contact_relay_models::{contact::ContactSubmission, email_address::EmailAddress};
use tracing::debug;

pub mod validation;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email> {
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Where every contact message is delivered to.
    pub recipient: Arc<EmailAddress>,
}

impl<EmailS> ContactServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactServiceConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactService for ContactServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let violations = validation::validate(&submission);
        if !violations.is_empty() {
            debug!(?violations, "rejecting invalid contact submission");
            return Err(ContactSendMessageError::Validation(violations));
        }

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("Message from {}", *submission.name),
            body: format!(
                "<p><strong>Telegram:</strong> {}</p>\n\
                 <p><strong>Email:</strong> {}</p>\n\
                 <p>{}</p>",
                tera::escape_html(&submission.telegram),
                tera::escape_html(&submission.email),
                tera::escape_html(&submission.message),
            ),
            content_type: ContentType::Html,
            reply_to: submission.email.parse().ok(),
        };

        self.email
            .send(email)
            .await
            .map_err(ContactSendMessageError::Send)
    }
}
