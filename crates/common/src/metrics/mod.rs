//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all osintdeck metrics
pub const METRICS_PREFIX: &str = "osintdeck";

/// Histogram buckets for request latency (in seconds)
///
/// Searches and access checks sleep for a configured delay, so the upper
/// buckets matter as much as the lower ones.
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.010, // 10ms
    0.050, // 50ms
    0.100, // 100ms
    0.250, // 250ms
    0.500, // 500ms
    1.000, // 1s
    1.500, // 1.5s - default simulated latency
    2.000, // 2s
    3.000, // 3s
    5.000, // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Search metrics
    describe_counter!(
        format!("{}_search_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of search queries"
    );

    describe_histogram!(
        format!("{}_search_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Search latency in seconds, simulated delay included"
    );

    describe_gauge!(
        format!("{}_search_findings_count", METRICS_PREFIX),
        Unit::Count,
        "Number of findings returned by the last search"
    );

    // Access gate metrics
    describe_counter!(
        format!("{}_access_attempts_total", METRICS_PREFIX),
        Unit::Count,
        "Total access code attempts"
    );

    describe_counter!(
        format!("{}_rate_limited_total", METRICS_PREFIX),
        Unit::Count,
        "Requests refused by the global rate limiter"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record search metrics
pub fn record_search(duration_secs: f64, source: &str, kind: &str, finding_count: usize) {
    counter!(
        format!("{}_search_queries_total", METRICS_PREFIX),
        "source" => source.to_string(),
        "kind" => kind.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_search_duration_seconds", METRICS_PREFIX),
        "source" => source.to_string()
    )
    .record(duration_secs);

    gauge!(
        format!("{}_search_findings_count", METRICS_PREFIX),
        "source" => source.to_string()
    )
    .set(finding_count as f64);
}

/// Helper to record access gate attempts
pub fn record_access_attempt(granted: bool) {
    let outcome = if granted { "granted" } else { "denied" };

    counter!(
        format!("{}_access_attempts_total", METRICS_PREFIX),
        "outcome" => outcome
    )
    .increment(1);
}
