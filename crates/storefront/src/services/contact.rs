//! Support form client.
//!
//! The contact page posts its fields to a third-party form-intake service
//! and shows a status line based on the reply. The intake service answers
//! JSON; validation failures come back as `{"errors": [{"message": ...}]}`.
//!
//! While a submission is in flight the submit control reads `Sending...` and
//! is disabled. Whatever the outcome, it is re-enabled after a fixed delay.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

use crate::config::ContactConfig;

/// Submit control label at rest.
pub const SUBMIT_LABEL: &str = "Submit Request";
/// Submit control label while a submission is in flight.
pub const SENDING_LABEL: &str = "Sending...";

const SENDING_MESSAGE: &str = "Your message is being sent...";
const SUCCESS_MESSAGE: &str = "Message sent successfully! We will contact you shortly.";
const GENERIC_ERROR_MESSAGE: &str = "Error sending message. Please try again.";
const NETWORK_ERROR_MESSAGE: &str = "A network error occurred. Please check your connection.";

/// Errors that can occur when submitting to the intake service.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Intake service answered with a non-success status.
    #[error("Intake rejected submission: {status} - {}", .messages.join(", "))]
    Rejected { status: u16, messages: Vec<String> },
}

#[derive(Debug, Deserialize)]
struct IntakeErrorBody {
    #[serde(default)]
    errors: Vec<IntakeFieldError>,
}

#[derive(Debug, Deserialize)]
struct IntakeFieldError {
    message: String,
}

/// HTTP client for the form-intake endpoint.
#[derive(Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ContactClient {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ContactConfig) -> Result<Self, ContactError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// POST the fields, form-encoded.
    ///
    /// # Errors
    ///
    /// - `ContactError::Http` on transport failure
    /// - `ContactError::Rejected` on a non-2xx reply, carrying any field
    ///   messages the service returned
    pub async fn submit(&self, fields: &[(String, String)]) -> Result<(), ContactError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(fields)
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let messages = response
            .json::<IntakeErrorBody>()
            .await
            .map(|body| body.errors.into_iter().map(|e| e.message).collect())
            .unwrap_or_default();

        Err(ContactError::Rejected {
            status: status.as_u16(),
            messages,
        })
    }
}

/// Styling class of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

impl StatusKind {
    /// CSS class applied to the status element.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Loading => "form-status-message loading",
            Self::Success => "form-status-message success",
            Self::Error => "form-status-message error",
        }
    }
}

/// Status line shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Status while the request is in flight.
    #[must_use]
    pub fn sending() -> Self {
        Self::new(StatusKind::Loading, SENDING_MESSAGE)
    }

    /// Map a submission result to what the visitor sees.
    #[must_use]
    pub fn from_result(result: &Result<(), ContactError>) -> Self {
        match result {
            Ok(()) => Self::new(StatusKind::Success, SUCCESS_MESSAGE),
            Err(ContactError::Rejected { messages, .. }) if !messages.is_empty() => {
                Self::new(StatusKind::Error, messages.join(", "))
            }
            Err(ContactError::Rejected { .. }) => {
                Self::new(StatusKind::Error, GENERIC_ERROR_MESSAGE)
            }
            Err(ContactError::Http(_)) => Self::new(StatusKind::Error, NETWORK_ERROR_MESSAGE),
        }
    }

    /// Fields are cleared only after a successful send.
    #[must_use]
    pub fn should_reset_form(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

/// The form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: SUBMIT_LABEL.to_owned(),
            disabled: false,
        }
    }
}

impl SubmitControl {
    fn begin(&mut self) {
        SENDING_LABEL.clone_into(&mut self.label);
        self.disabled = true;
    }

    fn reset(&mut self) {
        SUBMIT_LABEL.clone_into(&mut self.label);
        self.disabled = false;
    }
}

/// Contact page form: client plus submit-control handling.
#[derive(Clone)]
pub struct ContactForm {
    client: ContactClient,
    reset_delay: Duration,
}

impl ContactForm {
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ContactConfig) -> Result<Self, ContactError> {
        Ok(Self {
            client: ContactClient::new(config)?,
            reset_delay: config.reset_delay,
        })
    }

    /// Submit the form and return the status to display.
    ///
    /// `control` is disabled for the duration and re-enabled `reset_delay`
    /// after the request settles, on success and failure alike.
    #[instrument(skip(self, fields, control), fields(field_count = fields.len()))]
    pub async fn submit(
        &self,
        fields: &[(String, String)],
        control: &mut SubmitControl,
    ) -> StatusMessage {
        control.begin();
        info!(status = %StatusMessage::sending().text, "Submitting contact form");

        let result = self.client.submit(fields).await;
        match &result {
            Ok(()) => info!("Contact form delivered"),
            Err(e) => warn!(error = %e, "Contact form submission failed"),
        }
        let status = StatusMessage::from_result(&result);

        tokio::time::sleep(self.reset_delay).await;
        control.reset();
        status
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode, header};
    use axum::routing::post;

    use super::*;

    #[derive(Default)]
    struct Seen {
        bodies: Vec<String>,
        accept: Vec<String>,
    }

    async fn spawn_intake(status: StatusCode, reply: &'static str) -> (Url, Arc<Mutex<Seen>>) {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let recorder = Arc::clone(&seen);
        let app = Router::new().route(
            "/f/test",
            post(move |headers: AxumHeaders, body: String| {
                let recorder = Arc::clone(&recorder);
                async move {
                    let mut seen = recorder.lock().unwrap();
                    seen.bodies.push(body);
                    if let Some(accept) = headers.get(header::ACCEPT) {
                        seen.accept.push(accept.to_str().unwrap().to_owned());
                    }
                    (status, [(header::CONTENT_TYPE, "application/json")], reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        let url = Url::parse(&format!("http://{addr}/f/test")).unwrap();
        (url, seen)
    }

    fn form_for(endpoint: Url) -> ContactForm {
        ContactForm::new(&ContactConfig {
            endpoint,
            reset_delay: Duration::ZERO,
        })
        .unwrap()
    }

    fn fields() -> Vec<(String, String)> {
        vec![
            ("name".to_owned(), "Ada".to_owned()),
            ("email".to_owned(), "ada@example.com".to_owned()),
            ("message".to_owned(), "Where is my order?".to_owned()),
        ]
    }

    #[tokio::test]
    async fn test_success_posts_form_encoded() {
        let (url, seen) = spawn_intake(StatusCode::OK, r#"{"ok":true}"#).await;
        let mut control = SubmitControl::default();

        let status = form_for(url).submit(&fields(), &mut control).await;

        assert_eq!(status.kind, StatusKind::Success);
        assert!(status.should_reset_form());
        assert_eq!(control, SubmitControl::default());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.bodies.len(), 1);
        assert!(seen.bodies.iter().any(|b| b.contains("email=ada%40example.com")));
        assert_eq!(seen.accept, vec!["application/json".to_owned()]);
    }

    #[tokio::test]
    async fn test_validation_errors_are_joined() {
        let (url, _) = spawn_intake(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors":[{"message":"email is invalid"},{"message":"message is required"}]}"#,
        )
        .await;
        let mut control = SubmitControl::default();

        let status = form_for(url).submit(&fields(), &mut control).await;

        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "email is invalid, message is required");
        assert!(!status.should_reset_form());
        assert!(!control.disabled);
    }

    #[tokio::test]
    async fn test_error_without_details_is_generic() {
        let (url, _) = spawn_intake(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;
        let mut control = SubmitControl::default();

        let status = form_for(url).submit(&fields(), &mut control).await;
        assert_eq!(status.text, GENERIC_ERROR_MESSAGE);
        assert_eq!(status.kind.class(), "form-status-message error");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/f/test")).unwrap();
        let mut control = SubmitControl::default();

        let status = form_for(url).submit(&fields(), &mut control).await;
        assert_eq!(status.text, NETWORK_ERROR_MESSAGE);
        assert_eq!(control.label, SUBMIT_LABEL);
        assert!(!control.disabled);
    }

    #[test]
    fn test_sending_status() {
        let status = StatusMessage::sending();
        assert_eq!(status.kind, StatusKind::Loading);
        assert_eq!(status.kind.class(), "form-status-message loading");

        let mut control = SubmitControl::default();
        control.begin();
        assert_eq!(control.label, SENDING_LABEL);
        assert!(control.disabled);
    }
}
