//! Prometheus metrics for the Secure Token Service.
//!
//! Provides counters and histograms for observability.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// Tokens issued counter.
pub static TOKENS_ISSUED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sts_tokens_issued_total",
        "Total number of tokens issued",
        &["algorithm"]
    )
    .expect("Failed to register tokens_issued metric")
});

/// Authentication outcomes counter.
pub static AUTHENTICATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sts_authentications_total",
        "Total number of authentication attempts",
        &["outcome"]
    )
    .expect("Failed to register authentications metric")
});

/// Credential registrations counter.
pub static REGISTRATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sts_registrations_total",
        "Total number of credential registrations",
        &["outcome"]
    )
    .expect("Failed to register registrations metric")
});

/// Signing key load attempts.
pub static KEY_LOADS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sts_key_loads_total",
        "Signing key load attempts at startup",
        &["status"]
    )
    .expect("Failed to register key_loads metric")
});

/// HTTP handler latency histogram.
pub static HTTP_LATENCY: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "sts_http_latency_seconds",
        "HTTP handler latency in seconds",
        &["route"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register http_latency metric")
});

/// Record a token issuance.
pub fn record_token_issued(algorithm: &str) {
    TOKENS_ISSUED.with_label_values(&[algorithm]).inc();
}

/// Record an authentication outcome.
pub fn record_authentication(outcome: &str) {
    AUTHENTICATIONS.with_label_values(&[outcome]).inc();
}

/// Record a registration outcome.
pub fn record_registration(outcome: &str) {
    REGISTRATIONS.with_label_values(&[outcome]).inc();
}

/// Record a key load attempt.
pub fn record_key_load(status: &str) {
    KEY_LOADS.with_label_values(&[status]).inc();
}

/// Record HTTP handler latency.
pub fn record_http_latency(route: &str, duration_secs: f64) {
    HTTP_LATENCY.with_label_values(&[route]).observe(duration_secs);
}

/// Render the default registry in the Prometheus text format.
#[must_use]
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder.encode(&prometheus::gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
