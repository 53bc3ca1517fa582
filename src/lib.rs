//! Signed webhook notification delivery.
//!
//! Serializes a payload to JSON, signs the exact body bytes with the
//! endpoint's shared secret (HMAC-SHA256, hex, sent in
//! `X-Gophish-Signature`) and POSTs it.
//!
//! ## Guarantees
//! - One shared, pooled HTTP client with a fixed timeout
//! - Redirects are never followed
//! - Per-endpoint isolation during fan-out
//! - At most one attempt per call
//!
//! ## Non-Guarantees
//! - Retries or backoff
//! - Durable or queued delivery
//! - Aggregate results for broadcasts (those are logged only)
//!
//! A response below 400 counts as delivered. That includes 3xx, since the
//! redirect itself is what comes back.

mod dispatcher;
mod error;
mod sender;
mod service;
mod signing;
mod storage;
mod telemetry;
mod types;

pub use dispatcher::Dispatcher;
pub use error::{DeliveryError, DirectoryError, SigningError, VerificationError};
pub use sender::{encode_payload, Sender, SenderConfig, DEFAULT_TIMEOUT_SECS, MIN_ERROR_STATUS};
pub use service::{ErrorResponse, Ping, ServiceError, WebhookService};
pub use signing::{find_signature, sign, verify_signature, verify_webhook_request, SIGNATURE_HEADER};
pub use storage::{InMemoryDirectory, WebhookDirectory};
pub use types::{Endpoint, Webhook, WebhookId};

/// Result of one delivery attempt.
pub type DeliveryOutcome = Result<(), DeliveryError>;
