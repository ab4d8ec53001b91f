//! Transmits a completed lead to the remote contact endpoint.
//!
//! One POST, `multipart/form-data`, no automatic retry. The call is atomic
//! from the controller's perspective: it either fully succeeds (any 2xx) or
//! fails with a classified [`SubmissionError`].

use std::time::Duration;

use reqwest::blocking::{multipart, Client};

use crate::errors::SubmissionError;
use crate::schema::{self, keys};
use crate::wizard::FormState;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Seam between the wizard controller and the network. Tests substitute a
/// scripted implementation.
pub trait SubmissionClient {
    fn submit(&self, state: &FormState) -> Result<(), SubmissionError>;
}

/// Production client backed by a blocking reqwest [`Client`].
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Multipart payload: every non-empty text field under its wire name,
    /// plus the resume as a binary part when present.
    fn build_form(state: &FormState) -> Result<multipart::Form, reqwest::Error> {
        let mut form = multipart::Form::new();
        for (key, value) in state.text_fields() {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                form = form.text(key, trimmed.to_string());
            }
        }
        if let Some(resume) = state.resume() {
            let mut part = multipart::Part::bytes(resume.bytes().to_vec())
                .file_name(resume.file_name().to_string());
            if let Some(mime) = schema::resume_mime(resume.file_name()) {
                part = part.mime_str(mime)?;
            }
            form = form.part(keys::RESUME, part);
        }
        Ok(form)
    }
}

impl SubmissionClient for HttpSubmissionClient {
    fn submit(&self, state: &FormState) -> Result<(), SubmissionError> {
        tracing::debug!(endpoint = %self.endpoint, "posting lead");

        let form =
            Self::build_form(state).map_err(|err| SubmissionError::Network(err.to_string()))?;
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|err| SubmissionError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "lead accepted");
            return Ok(());
        }

        let reason = status.canonical_reason().unwrap_or("unknown status");
        let body = response.text().unwrap_or_default();
        let message = if body.trim().is_empty() {
            reason.to_string()
        } else {
            format!("{reason}: {}", body.trim())
        };
        Err(SubmissionError::ServerRejected {
            status: status.as_u16(),
            message,
        })
    }
}
