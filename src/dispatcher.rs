use std::sync::Arc;

use serde::Serialize;

use crate::error::DeliveryError;
use crate::sender::{encode_payload, Sender, SenderConfig};
use crate::telemetry;
use crate::types::Endpoint;
use crate::DeliveryOutcome;

/// Entry point for notification delivery.
///
/// `send_single` is an awaited pass-through to the [`Sender`].
/// `send_all` broadcasts and logs: every endpoint gets its own task, and
/// no result ever comes back to the caller. Nothing is retried.
///
/// Cloning is cheap; clones share one `Sender` and its connection pool.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    sender: Arc<Sender>,
}

impl Dispatcher {
    pub fn new(sender: Sender) -> Self {
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn from_config(config: SenderConfig) -> Result<Self, DeliveryError> {
        Ok(Self::new(Sender::new(config)?))
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    /// Deliver `payload` to one endpoint and report the outcome.
    pub async fn send_single<T>(&self, endpoint: &Endpoint, payload: &T) -> DeliveryOutcome
    where
        T: Serialize + ?Sized,
    {
        self.sender.send(endpoint, payload).await
    }

    /// Fire-and-forget delivery of `payload` to every endpoint.
    ///
    /// The payload is encoded once; each endpoint then gets an independent
    /// task holding its own copy of the endpoint. Tasks are spawned without
    /// waiting on each other and this call returns immediately. Failures,
    /// including an unencodable payload, are logged and dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send_all<T>(&self, endpoints: &[Endpoint], payload: &T)
    where
        T: Serialize + ?Sized,
    {
        let body = match encode_payload(payload) {
            Ok(body) => body,
            Err(err) => {
                telemetry::fanout_skipped(endpoints.len(), &err);
                return;
            }
        };

        for endpoint in endpoints {
            let sender = Arc::clone(&self.sender);
            let endpoint = endpoint.clone();
            let body = body.clone();

            telemetry::metric_inc("webhook.fanout.spawned");
            // Outcome already logged by the sender.
            tokio::spawn(async move {
                let _ = sender.send_encoded(&endpoint, body).await;
            });
        }
    }
}
