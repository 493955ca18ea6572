use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use contact_relay_core_contact_contracts::{ContactSendMessageError, ContactService};
use contact_relay_models::contact::ContactViolation;
use tracing::{debug, error};

use crate::models::{contact::ApiContactSubmission, ApiErrors, ApiFieldError};

pub const MESSAGE_SENT: &str = "Message sent!";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/send-email", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    submission: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match submission {
        Ok(Json(submission)) => submission,
        Err(rejection) => return invalid_body(rejection),
    };

    match service.send_message(submission.into()).await {
        Ok(()) => MESSAGE_SENT.into_response(),
        Err(ContactSendMessageError::Validation(violations)) => validation_failed(violations),
        Err(ContactSendMessageError::Send(err)) => {
            error!("Failed to send contact message: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

fn validation_failed(violations: Vec<ContactViolation>) -> Response {
    let errors = violations.into_iter().map(Into::into).collect();
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiErrors { errors })).into_response()
}

fn invalid_body(rejection: JsonRejection) -> Response {
    debug!(%rejection, "rejecting contact request body");
    let errors = vec![ApiFieldError {
        field: None,
        message: rejection.body_text(),
    }];
    (rejection.status(), Json(ApiErrors { errors })).into_response()
}
