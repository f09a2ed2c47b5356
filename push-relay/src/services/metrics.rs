//! Metrics collection for push-relay.
//!
//! Counters are recorded through the `metrics` facade and rendered by the
//! Prometheus exporter installed in [`init_metrics`].

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once, from `main`.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("failed to install Prometheus recorder: {}", e))
    })?;

    METRICS_HANDLE.set(handle).map_err(|_| {
        AppError::InternalError(anyhow::anyhow!("metrics handle already initialized"))
    })
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one relay request by outcome.
pub fn record_relay_request(outcome: &str) {
    counter!("push_relay_requests_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record one gateway call by HTTP status or failure kind.
pub fn record_gateway_call(status: &str) {
    counter!("push_gateway_calls_total", "status" => status.to_string()).increment(1);
}
