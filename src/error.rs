//! Error types for Coach API operations.
//!
//! Every failed call surfaces as a single [`CoachError`] tagged with the
//! most specific [`ErrorKind`] that applies. Callers match on
//! [`CoachError::kind`] instead of downcasting.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Classification of a failed call by cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server rejected the credentials (401).
    Authentication,
    /// The caller is authenticated but not allowed (403).
    Authorization,
    /// The resource does not exist (404).
    NotFound,
    /// The request was rejected as invalid (400, 422).
    Validation,
    /// Too many requests (429).
    RateLimit,
    /// The server failed to handle the request (500, 502, 503, 504).
    Server,
    /// No response was received, or the request could not be set up.
    Network,
    /// No response was received within the configured timeout.
    Timeout,
    /// Any other failure.
    Generic,
}

impl ErrorKind {
    /// Map an HTTP status code to its error kind.
    ///
    /// Codes without a dedicated kind map to [`ErrorKind::Generic`].
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::Authorization,
            404 => Self::NotFound,
            400 | 422 => Self::Validation,
            429 => Self::RateLimit,
            500 | 502 | 503 | 504 => Self::Server,
            _ => Self::Generic,
        }
    }

    /// Returns true for failures where no response was received.
    ///
    /// A timeout is a specialization of a network failure.
    #[must_use]
    pub fn is_network(self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::NotFound => "not found",
            Self::Validation => "validation",
            Self::RateLimit => "rate limit",
            Self::Server => "server",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Generic => "api",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned by a Coach API operation.
#[derive(Debug, Error)]
#[error("{kind} error: {message}")]
pub struct CoachError {
    kind: ErrorKind,
    message: String,
    status_code: Option<u16>,
    raw_response: Option<Value>,
    validation_details: Vec<String>,
    retry_after_secs: Option<u64>,
    #[source]
    source: Option<reqwest::Error>,
}

impl CoachError {
    /// Create an error of the given kind with no response attached.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            raw_response: None,
            validation_details: Vec::new(),
            retry_after_secs: None,
            source: None,
        }
    }

    /// Create the error for a failed response with the given status.
    ///
    /// The kind is chosen with [`ErrorKind::from_status`]. For validation
    /// errors, field-level details are read from the `errors` member of the
    /// response body when present.
    pub fn from_status(status: u16, message: impl Into<String>, raw_response: Option<Value>) -> Self {
        let kind = ErrorKind::from_status(status);
        let validation_details = match (kind, &raw_response) {
            (ErrorKind::Validation, Some(body)) => validation_details(body),
            _ => Vec::new(),
        };

        Self {
            status_code: Some(status),
            raw_response,
            validation_details,
            ..Self::new(kind, message)
        }
    }

    /// A failure where no response was received.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// A request that did not complete within its timeout.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub(crate) fn with_source(mut self, source: reqwest::Error) -> Self {
        self.source = Some(source);
        self
    }

    pub(crate) fn with_raw_response(mut self, raw: Value) -> Self {
        self.raw_response = Some(raw);
        self
    }

    pub(crate) fn with_retry_after(mut self, secs: Option<u64>) -> Self {
        self.retry_after_secs = secs;
        self
    }

    /// The error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The response body, when a response was received.
    ///
    /// JSON bodies are kept as parsed; anything else is kept as a string.
    pub fn raw_response(&self) -> Option<&Value> {
        self.raw_response.as_ref()
    }

    /// Field-level validation messages. Empty unless the kind is
    /// [`ErrorKind::Validation`] and the server listed them.
    pub fn validation_details(&self) -> &[String] {
        &self.validation_details
    }

    /// Seconds from the `Retry-After` header of a 429 response.
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.retry_after_secs
    }
}

/// Extract field-level messages from a validation response body.
///
/// Accepts `errors` as a list of strings, a list of objects with a
/// `message` (and optional `field`), or an object mapping field names to a
/// message or list of messages.
fn validation_details(body: &Value) -> Vec<String> {
    match body.get("errors") {
        Some(Value::Array(items)) => items.iter().map(detail_from_item).collect(),
        Some(Value::Object(fields)) => fields
            .iter()
            .flat_map(|(field, messages)| match messages {
                Value::Array(list) => list
                    .iter()
                    .map(|m| format!("{field}: {}", value_text(m)))
                    .collect::<Vec<_>>(),
                other => vec![format!("{field}: {}", value_text(other))],
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn detail_from_item(item: &Value) -> String {
    let message = item.get("message").and_then(Value::as_str);
    let field = item.get("field").and_then(Value::as_str);
    match (field, message) {
        (Some(field), Some(message)) => format!("{field}: {message}"),
        (None, Some(message)) => message.to_string(),
        _ => value_text(item),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Result type alias for Coach API operations.
pub type Result<T> = core::result::Result<T, CoachError>;
