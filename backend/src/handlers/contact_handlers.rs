use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Form, Json};
use common::{validate_submission, ContactResponse, Field, FormSubmission};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::utils::email_utils;
use crate::AppState;

pub const SENT_MESSAGE: &str = "Thank you for contacting us! We will get back to you soon.";

/// Raw form body. `website` is the honeypot, invisible to people.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    company: String,
    help_type: String,
    message: String,
    website: String,
}

impl ContactRequest {
    fn into_parts(self) -> (FormSubmission, String) {
        let submission = FormSubmission {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            help_type: self.help_type,
            message: self.message,
        }
        .trimmed();
        (submission, self.website)
    }
}

type ContactReply = (StatusCode, Json<ContactResponse>);

pub async fn send_email(
    State(state): State<Arc<AppState>>,
    Form(request): Form<ContactRequest>,
) -> ContactReply {
    let (submission, honeypot) = request.into_parts();

    let result = validate_submission(&submission);
    if !result.is_valid() {
        let fields: Vec<&str> = result.fields().map(Field::key).collect();
        info!("Rejected contact form submission, invalid fields: {:?}", fields);
        return (StatusCode::OK, Json(ContactResponse::rejected(&result)));
    }

    if !honeypot.trim().is_empty() {
        warn!("Honeypot field filled in, dropping submission");
        return (
            StatusCode::FORBIDDEN,
            Json(ContactResponse::failed("Spam detected")),
        );
    }

    let email = email_utils::compose(&state.config, &submission);
    match state.mailer.send(&email).await {
        Ok(()) => {
            info!("Relayed {} enquiry", submission.help_type);
            (StatusCode::OK, Json(ContactResponse::sent(SENT_MESSAGE)))
        }
        Err(e) => {
            error!("Failed to send contact email: {}", e);
            (
                StatusCode::OK,
                Json(ContactResponse::failed(format!(
                    "Sorry, there was an error sending your message. Please try again later or contact us directly at {}",
                    state.config.recipient_email()
                ))),
            )
        }
    }
}

pub async fn method_not_allowed() -> ContactReply {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ContactResponse::failed(
            "Method not allowed. Only POST requests are accepted.",
        )),
    )
}
