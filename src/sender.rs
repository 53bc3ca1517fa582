use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;
use crate::signing::{sign, SIGNATURE_HEADER};
use crate::telemetry;
use crate::types::Endpoint;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Lowest status code classified as a failed delivery.
pub const MIN_ERROR_STATUS: u16 = 400;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Transport settings shared by every delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Upper bound for one request, connect through response headers.
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Duration,

    /// Header carrying the body signature.
    pub signature_header: String,

    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            signature_header: SIGNATURE_HEADER.to_string(),
            user_agent: concat!("webhook-notifier/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SenderConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_signature_header(mut self, header: impl Into<String>) -> Self {
        self.signature_header = header.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Performs one signed POST per call.
///
/// Owns the pooled HTTP client. Build it once and share it; clones are
/// cheap and reuse the same connection pool. Redirects are never followed:
/// a 3xx comes back as-is so the signed body can't be replayed to another
/// host.
#[derive(Debug, Clone)]
pub struct Sender {
    client: reqwest::Client,
    config: SenderConfig,
}

impl Sender {
    pub fn new(config: SenderConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| DeliveryError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn with_defaults() -> Result<Self, DeliveryError> {
        Self::new(SenderConfig::default())
    }

    pub fn config(&self) -> &SenderConfig {
        &self.config
    }

    /// Serialize `payload` and deliver it to `endpoint`.
    pub async fn send<T>(&self, endpoint: &Endpoint, payload: &T) -> Result<(), DeliveryError>
    where
        T: Serialize + ?Sized,
    {
        let body = encode_payload(payload).inspect_err(|err| {
            telemetry::delivery_failed(&endpoint.url, err);
        })?;
        self.send_encoded(endpoint, body).await
    }

    /// Deliver an already-encoded JSON body.
    ///
    /// The signature is computed over exactly these bytes.
    pub async fn send_encoded(&self, endpoint: &Endpoint, body: Bytes) -> Result<(), DeliveryError> {
        match self.deliver(endpoint, body).await {
            Ok(status) => {
                telemetry::metric_inc("webhook.delivery.success");
                telemetry::delivery_succeeded(&endpoint.url, status.as_u16());
                Ok(())
            }
            Err(err) => {
                telemetry::metric_inc("webhook.delivery.failure");
                telemetry::delivery_failed(&endpoint.url, &err);
                Err(err)
            }
        }
    }

    async fn deliver(&self, endpoint: &Endpoint, body: Bytes) -> Result<StatusCode, DeliveryError> {
        let signature = sign(&endpoint.secret, &body)?;

        let response = self
            .client
            .post(&endpoint.url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(self.config.signature_header.as_str(), signature)
            .body(body)
            .send()
            .await?;

        // Only the status matters; dropping the response returns the
        // connection to the pool.
        let status = response.status();
        drop(response);

        classify(status)
    }
}

/// Encode a payload the way it goes on the wire.
pub fn encode_payload<T>(payload: &T) -> Result<Bytes, DeliveryError>
where
    T: Serialize + ?Sized,
{
    Ok(Bytes::from(serde_json::to_vec(payload)?))
}

fn classify(status: StatusCode) -> Result<StatusCode, DeliveryError> {
    if status.as_u16() >= MIN_ERROR_STATUS {
        Err(DeliveryError::ServerRejected { status })
    } else {
        Ok(status)
    }
}
