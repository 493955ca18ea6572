use contact_relay_models::contact::{ContactField, ContactViolation};
use serde::Serialize;

pub mod contact;

/// Body of a response rejecting the request because of invalid input.
#[derive(Debug, Serialize)]
pub struct ApiErrors {
    pub errors: Vec<ApiFieldError>,
}

#[derive(Debug, Serialize)]
pub struct ApiFieldError {
    /// `None` if the request body as a whole could not be decoded
    pub field: Option<ContactField>,
    pub message: String,
}

impl From<ContactViolation> for ApiFieldError {
    fn from(value: ContactViolation) -> Self {
        Self {
            field: Some(value.field),
            message: value.message.into(),
        }
    }
}
