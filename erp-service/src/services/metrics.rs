//! Prometheus metrics for erp-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// Histogram for database query duration by operation.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "erp_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Counter for statements built, by account type.
pub static STATEMENTS_BUILT: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "erp_statements_built_total",
        "Total number of ledger statements built",
        &["account_type"]
    )
    .expect("Failed to register STATEMENTS_BUILT")
});

/// Counter for supplier payment recording attempts.
pub static PAYMENTS_RECORDED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "erp_payments_recorded_total",
        "Total number of supplier payment recording attempts",
        &["outcome"]
    )
    .expect("Failed to register PAYMENTS_RECORDED")
});

/// Counter for printable reports rendered.
pub static REPORTS_RENDERED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "erp_reports_rendered_total",
        "Total number of printable reports rendered",
        &["report"]
    )
    .expect("Failed to register REPORTS_RENDERED")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&STATEMENTS_BUILT);
    Lazy::force(&PAYMENTS_RECORDED);
    Lazy::force(&REPORTS_RENDERED);
}

/// Get all metrics as Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}
