//! Failure taxonomy for calls to the invoice service.
//!
//! Transport failures, non-2xx responses and `status: "error"` bodies all end up
//! here; front ends render them with [`ClientError::user_message`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The `{field, error}` pair attached to a service-reported error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorDetails {
    /// Accept either the structured object or a bare string.
    pub(crate) fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(_) => serde_json::from_value(value).ok(),
            serde_json::Value::String(error) => Some(Self {
                field: None,
                error: Some(error),
            }),
            _ => None,
        }
    }
}

impl core::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (&self.field, &self.error) {
            (Some(field), Some(error)) => write!(f, "{field}: {error}"),
            (Some(field), None) => f.write_str(field),
            (None, Some(error)) => f.write_str(error),
            (None, None) => Ok(()),
        }
    }
}

/// Error reported by the service in a `status: "error"` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// HTTP status the body arrived with.
    pub http_status: u16,
    /// Machine code, e.g. `VALIDATION_ERROR`.
    pub code: Option<String>,
    pub message: String,
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No response (connection refused, DNS, timeout, ...).
    #[error("network error: {0}")]
    Transport(String),
    /// Non-2xx response without a recognisable error body.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("service error: {}", .0.message)]
    Service(ServiceError),
    /// 2xx response that does not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }

    /// Machine code, when the service supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Service(e) => e.code.as_deref(),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            ClientError::Service(e) => e.details.as_ref(),
            _ => None,
        }
    }

    /// Single line suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(e) => format!("Could not reach the invoice service ({e})"),
            ClientError::Http { status, message } => format!("{message} (HTTP {status})"),
            ClientError::Service(e) => match &e.details {
                Some(details) if details.field.is_some() || details.error.is_some() => {
                    format!("{} [{details}]", e.message)
                }
                _ => e.message.clone(),
            },
            ClientError::Decode(e) => format!("Unexpected response from the invoice service ({e})"),
        }
    }
}
