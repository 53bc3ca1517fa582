use reqwest::StatusCode;
use thiserror::Error;

use crate::types::WebhookId;

/// Errors from a single delivery attempt.
///
/// None of these are retried. `send_single` hands them back to the caller;
/// `send_all` only logs them.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Payload could not be encoded.
    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HMAC could not be computed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// DNS, connect, refused, or any other I/O failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The fixed request timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// Remote answered with a status of 400 or above.
    #[error("http status of response: {status}")]
    ServerRejected { status: StatusCode },

    /// The HTTP client could not be built.
    #[error("invalid sender configuration: {0}")]
    Configuration(String),
}

impl DeliveryError {
    /// Whether the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, DeliveryError::Transport(_) | DeliveryError::Timeout)
    }

    /// Status returned by the remote, if it answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DeliveryError::ServerRejected { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DeliveryError::Timeout
        } else {
            DeliveryError::Transport(err)
        }
    }
}

/// The MAC primitive refused the key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to initialize signature: {0}")]
pub struct SigningError(pub String);

/// Receiver-side signature check failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("signature header missing")]
    MissingSignature,

    #[error("signature does not match payload")]
    InvalidSignature,
}

/// Failures from a [`WebhookDirectory`](crate::WebhookDirectory).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("webhook not found: {0}")]
    NotFound(WebhookId),

    /// Backend-specific failure.
    #[error("webhook directory unavailable: {0}")]
    Unavailable(String),
}
