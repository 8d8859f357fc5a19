use lazy_static::lazy_static;
use prometheus::{
    Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter = register_counter!(
        "gateway_chat_requests_total",
        "Total number of chat requests received"
    )
    .unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "gateway_rate_limited_total",
        "Chat requests rejected by the cooldown"
    )
    .unwrap();
    pub static ref UPSTREAM_FAILURES: Counter = register_counter!(
        "gateway_upstream_failures_total",
        "Upstream calls that failed or returned no completion"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "gateway_request_latency_seconds",
        "Chat request latency in seconds"
    )
    .unwrap();
    pub static ref COOLDOWN_ENTRIES: Gauge = register_gauge!(
        "gateway_cooldown_entries",
        "Current number of tracked client keys"
    )
    .unwrap();
}
