use contact_relay_models::contact::{
    ContactEmail, ContactMessage, ContactName, ContactSubmission, ContactTelegram,
};
use serde::Deserialize;

/// Fields that are missing or `null` are treated as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactSubmission {
    /// Full name of the sender
    pub name: Option<ContactName>,
    /// Telegram handle of the sender
    pub telegram: Option<ContactTelegram>,
    /// Email address of the sender
    pub email: Option<ContactEmail>,
    /// Content of the message
    pub message: Option<ContactMessage>,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name.unwrap_or_else(|| String::new().into()),
            telegram: value.telegram.unwrap_or_else(|| String::new().into()),
            email: value.email.unwrap_or_else(|| String::new().into()),
            message: value.message.unwrap_or_else(|| String::new().into()),
        }
    }
}
