//! Operations a REST-style controller calls to list, validate and notify
//! webhooks. Routing and response writing stay with the host.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::dispatcher::Dispatcher;
use crate::error::{DeliveryError, DirectoryError};
use crate::storage::WebhookDirectory;
use crate::types::{Endpoint, Webhook, WebhookId};

/// Body sent when validating a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ping {
    pub event: &'static str,
    pub webhook_id: WebhookId,
}

impl Ping {
    pub fn new(webhook_id: WebhookId) -> Self {
        Self {
            event: "ping",
            webhook_id,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl ServiceError {
    /// HTTP status a controller should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Delivery(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Failure envelope for the response body.
    pub fn response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            message: self.to_string(),
        }
    }
}

/// `{"success": false, "message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Clone)]
pub struct WebhookService {
    directory: Arc<dyn WebhookDirectory>,
    dispatcher: Dispatcher,
}

impl WebhookService {
    pub fn new(directory: Arc<dyn WebhookDirectory>, dispatcher: Dispatcher) -> Self {
        Self {
            directory,
            dispatcher,
        }
    }

    pub async fn list(&self) -> Result<Vec<Webhook>, ServiceError> {
        Ok(self.directory.list().await?)
    }

    /// Ping one webhook now and hand back its record if it accepted.
    pub async fn validate(&self, id: WebhookId) -> Result<Webhook, ServiceError> {
        let webhook = self.directory.get(id).await?;
        self.dispatcher
            .send_single(&webhook.endpoint(), &Ping::new(webhook.id))
            .await?;
        Ok(webhook)
    }

    /// Broadcast `payload` to every active webhook.
    ///
    /// Returns how many deliveries were scheduled. Their outcomes are only
    /// logged.
    pub async fn notify_active<T>(&self, payload: &T) -> Result<usize, ServiceError>
    where
        T: Serialize + ?Sized,
    {
        let endpoints: Vec<Endpoint> = self
            .directory
            .list()
            .await?
            .iter()
            .filter(|w| w.is_active)
            .map(Webhook::endpoint)
            .collect();

        self.dispatcher.send_all(&endpoints, payload);
        Ok(endpoints.len())
    }
}
