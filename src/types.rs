use std::fmt;

use serde::{Deserialize, Serialize};

/// Destination for webhook delivery.
///
/// An `Endpoint` describes *where* a payload is posted and *which secret*
/// signs it. It is a pure value with no internal state; fan-out hands
/// every delivery task its own clone.
///
/// The secret is only ever fed to the signer. `Debug` redacts it so an
/// endpoint can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Target URL. Not validated here; the caller owns that.
    pub url: String,

    /// Shared key for HMAC signing.
    pub secret: String,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("url", &self.url)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Unique identifier for a stored webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookId(pub i64);

impl fmt::Display for WebhookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered webhook as handed out by a [`WebhookDirectory`].
///
/// Serializing a `Webhook` (for an API response, say) never includes the
/// secret.
///
/// [`WebhookDirectory`]: crate::WebhookDirectory
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: WebhookId,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing, default)]
    pub secret: String,
    pub is_active: bool,
}

impl Webhook {
    /// Create an active webhook.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        url: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            id: WebhookId(id),
            name: name.into(),
            url: url.into(),
            secret: secret.into(),
            is_active: true,
        }
    }

    /// Mark the webhook active or inactive.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Delivery target for this webhook.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.url.clone(), self.secret.clone())
    }
}

impl fmt::Debug for Webhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Webhook")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("url", &self.url)
            .field("secret", &"<redacted>")
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secret() {
        let endpoint = Endpoint::new("https://example.com/hook", "s3cr3t");
        let rendered = format!("{endpoint:?}");
        assert!(rendered.contains("https://example.com/hook"));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn serialized_webhook_omits_secret() {
        let webhook = Webhook::new(7, "alerts", "https://example.com/hook", "s3cr3t");
        let json = serde_json::to_value(&webhook).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "alerts");
        assert_eq!(json["is_active"], true);
        assert!(json.get("secret").is_none());
    }

    #[test]
    fn endpoint_projection_carries_url_and_secret() {
        let webhook = Webhook::new(1, "a", "http://localhost/x", "k");
        assert_eq!(webhook.endpoint(), Endpoint::new("http://localhost/x", "k"));
    }
}
