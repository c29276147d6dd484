//! Prometheus metrics for request latency and store activity.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{debug, info};

use crate::error::Result;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Todos added counter metric name.
pub const METRIC_TODOS_ADDED: &str = "todos_added_total";
/// Todos deleted counter metric name.
pub const METRIC_TODOS_DELETED: &str = "todos_deleted_total";
/// Deletes that matched nothing.
pub const METRIC_DELETE_NOOPS: &str = "todo_delete_noops_total";
/// Unauthorized requests counter metric name.
pub const METRIC_UNAUTHORIZED: &str = "unauthorized_requests_total";
/// Users with a todo list.
pub const METRIC_USERS: &str = "todo_users";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_TODOS_ADDED, "Total number of todos added");
    describe_counter!(METRIC_TODOS_DELETED, "Total number of todos deleted");
    describe_counter!(
        METRIC_DELETE_NOOPS,
        "Delete requests whose index matched no todo"
    );
    describe_counter!(
        METRIC_UNAUTHORIZED,
        "Requests rejected by the authorization gate"
    );
    describe_gauge!(METRIC_USERS, "Usernames present in the store");

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter listening on `addr`.
pub fn install_exporter(addr: SocketAddr) -> Result<()> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// Increment todos added counter.
pub fn inc_todos_added() {
    counter!(METRIC_TODOS_ADDED).increment(1);
}

/// Increment todos deleted counter.
pub fn inc_todos_deleted() {
    counter!(METRIC_TODOS_DELETED).increment(1);
}

/// Increment delete no-op counter.
pub fn inc_delete_noops() {
    counter!(METRIC_DELETE_NOOPS).increment(1);
}

/// Increment unauthorized requests counter.
pub fn inc_unauthorized() {
    counter!(METRIC_UNAUTHORIZED).increment(1);
}

/// Set the current user count.
pub fn set_users(count: usize) {
    gauge!(METRIC_USERS).set(count as f64);
}

/// RAII guard recording request latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing a request to `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_http_latency(self.start, self.endpoint);
    }
}
