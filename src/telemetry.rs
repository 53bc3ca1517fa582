//! Logging and metrics shims. Both compile to no-ops when their feature is off.

use crate::error::DeliveryError;

#[cfg(feature = "metrics")]
pub(crate) fn metric_inc(name: &'static str) {
    metrics::increment_counter!(name);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn metric_inc(_name: &'static str) {}

#[cfg(feature = "tracing")]
pub(crate) fn delivery_succeeded(url: &str, status: u16) {
    tracing::debug!(url, status, "webhook delivered");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn delivery_succeeded(_url: &str, _status: u16) {}

#[cfg(feature = "tracing")]
pub(crate) fn delivery_failed(url: &str, error: &DeliveryError) {
    tracing::error!(url, error = %error, "webhook delivery failed");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn delivery_failed(_url: &str, _error: &DeliveryError) {}

#[cfg(feature = "tracing")]
pub(crate) fn fanout_skipped(endpoints: usize, error: &DeliveryError) {
    tracing::warn!(endpoints, error = %error, "webhook broadcast not sent");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn fanout_skipped(_endpoints: usize, _error: &DeliveryError) {}
