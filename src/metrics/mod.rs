//! Basic metrics instrumentation for a sync run.
//!
//! Provides counters and duration tracking for HTTP requests and the fetch pipeline.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the gateway and the batch fetcher.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors (including 404s)
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Client ids returned by listing calls
    client_ids_listed_total: Arc<AtomicU64>,

    /// Client records decoded successfully
    client_records_fetched_total: Arc<AtomicU64>,

    /// Client records the API reported as not found
    client_records_not_found_total: Arc<AtomicU64>,

    /// Per-client fetches that failed and were dropped
    fetch_failures_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            client_ids_listed_total: Arc::new(AtomicU64::new(0)),
            client_records_fetched_total: Arc::new(AtomicU64::new(0)),
            client_records_not_found_total: Arc::new(AtomicU64::new(0)),
            fetch_failures_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record client ids returned by a listing call.
    pub fn record_client_ids_listed(&self, count: usize) {
        self.client_ids_listed_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a decoded client record.
    pub fn record_client_record_fetched(&self) {
        self.client_records_fetched_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a client record reported as not found.
    pub fn record_client_record_not_found(&self) {
        self.client_records_not_found_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dropped per-client fetch failure.
    pub fn record_fetch_failure(&self) {
        self.fetch_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn client_ids_listed_total(&self) -> u64 {
        self.client_ids_listed_total.load(Ordering::Relaxed)
    }

    pub fn client_records_fetched_total(&self) -> u64 {
        self.client_records_fetched_total.load(Ordering::Relaxed)
    }

    pub fn client_records_not_found_total(&self) -> u64 {
        self.client_records_not_found_total.load(Ordering::Relaxed)
    }

    pub fn fetch_failures_total(&self) -> u64 {
        self.fetch_failures_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            client_ids_listed_total: self.client_ids_listed_total(),
            client_records_fetched_total: self.client_records_fetched_total(),
            client_records_not_found_total: self.client_records_not_found_total(),
            fetch_failures_total: self.fetch_failures_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub client_ids_listed_total: u64,
    pub client_records_fetched_total: u64,
    pub client_records_not_found_total: u64,
    pub fetch_failures_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}
