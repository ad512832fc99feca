use common::{ContactResponse, FormSubmission};
use gloo_net::http::Request;
use thiserror::Error;

use crate::config;

/// The exchange with the mail relay did not produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("could not read response: {0}")]
    Decode(String),
}

pub fn endpoint() -> String {
    format!("{}/api/send-email", config::get_backend_url())
}

/// `application/x-www-form-urlencoded` body: every field, empty when absent,
/// followed by the honeypot.
pub fn encode_form(submission: &FormSubmission, honeypot: &str) -> String {
    submission
        .pairs()
        .chain(std::iter::once(("website", honeypot)))
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub async fn post_submission(
    submission: FormSubmission,
    honeypot: String,
) -> Result<ContactResponse, TransportError> {
    let response = Request::post(&endpoint())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(encode_form(&submission, &honeypot))
        .send()
        .await
        .map_err(|e| TransportError::Request(e.to_string()))?;

    if !response.ok() {
        return Err(TransportError::Status(response.status()));
    }

    response
        .json::<ContactResponse>()
        .await
        .map_err(|e| TransportError::Decode(e.to_string()))
}
