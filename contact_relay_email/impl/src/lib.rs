use anyhow::{anyhow, ensure};
use contact_relay_email_contracts::{ContentType, Email, EmailService};
use contact_relay_models::email_address::EmailAddress;
use lettre::{
    message::header, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    /// Create a pooled smtp transport for the relay at `url`. The sender
    /// address doubles as the login name when a `password` is given.
    ///
    /// No connection is established until the first email is sent.
    pub fn new(url: &str, from: EmailAddress, password: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?;
        if let Some(password) = password {
            let credentials = Credentials::new(from.as_str().into(), password.into());
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            from,
            transport: builder.build(),
        })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone().into_mailbox())
            .to(email.recipient.into_mailbox());
        if let Some(reply_to) = email.reply_to {
            builder = builder.reply_to(reply_to.into_mailbox());
        }

        builder
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .map_err(Into::into)
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<()> {
        let message = self.build_message(email)?;

        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "smtp relay accepted message");
        ensure!(
            response.is_positive(),
            "smtp relay rejected message with code {}",
            response.code()
        );

        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_html_message() {
        // Arrange
        let sut = EmailServiceImpl::new(
            "smtp://localhost:2525",
            "relay@example.com".parse().unwrap(),
            None,
        )
        .unwrap();

        // Act
        let message = sut
            .build_message(Email {
                recipient: "contact@example.com".parse().unwrap(),
                subject: "Message from Ann Lee".into(),
                body: "<p>Hello</p>".into(),
                content_type: ContentType::Html,
                reply_to: Some("ann@example.com".parse().unwrap()),
            })
            .unwrap();

        // Assert
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("From: relay@example.com\r\n"), "{formatted}");
        assert!(formatted.contains("\r\nTo: contact@example.com\r\n"), "{formatted}");
        assert!(formatted.contains("Reply-To: ann@example.com\r\n"), "{formatted}");
        assert!(formatted.contains("Subject: Message from Ann Lee\r\n"), "{formatted}");
        assert!(
            formatted.contains("Content-Type: text/html; charset=utf-8\r\n"),
            "{formatted}"
        );
        assert!(formatted.contains("\r\n\r\n<p>Hello</p>"), "{formatted}");
    }

    #[tokio::test]
    async fn build_text_message_without_reply_to() {
        // Arrange
        let sut = EmailServiceImpl::new(
            "smtps://smtp.example.com:465",
            "relay@example.com".parse().unwrap(),
            Some("hunter2"),
        )
        .unwrap();

        // Act
        let message = sut
            .build_message(Email {
                recipient: "contact@example.com".parse().unwrap(),
                subject: "Test".into(),
                body: "Hello".into(),
                content_type: ContentType::Text,
                reply_to: None,
            })
            .unwrap();

        // Assert
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(!formatted.contains("Reply-To:"), "{formatted}");
        assert!(
            formatted.contains("Content-Type: text/plain; charset=utf-8\r\n"),
            "{formatted}"
        );
    }

    #[test]
    fn invalid_url() {
        EmailServiceImpl::new("not a url", "relay@example.com".parse().unwrap(), None)
            .unwrap_err();
    }
}
