use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::relay::RelayState;

lazy_static! {
    pub static ref ALERTS_RECEIVED_TOTAL: IntCounter = IntCounter::new(
        "alertrelay_alerts_received_total",
        "Total number of alerts decoded from inbound notifications."
    )
    .expect("valid metric definition");
    pub static ref REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "alertrelay_requests_total",
            "Total number of handled notifications, by outcome."
        ),
        &["outcome"]
    )
    .expect("valid metric definition");
    pub static ref REGISTRY: Registry = {
        let registry = Registry::new();
        registry
            .register(Box::new(ALERTS_RECEIVED_TOTAL.clone()))
            .expect("Failed to register ALERTS_RECEIVED_TOTAL");
        registry
            .register(Box::new(REQUESTS_TOTAL.clone()))
            .expect("Failed to register REQUESTS_TOTAL");
        registry
    };
}

pub fn record_alerts(count: usize) {
    ALERTS_RECEIVED_TOTAL.inc_by(count as u64);
}

pub fn record_outcome(state: RelayState) {
    REQUESTS_TOTAL.with_label_values(&[state.as_str()]).inc();
}

// Function to gather metrics for exposition
pub fn gather_metrics() -> crate::Result<String> {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| crate::Error::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| crate::Error::Internal(format!("Failed to convert metrics to string: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_includes_outcomes() {
        record_outcome(RelayState::ParseFailed);
        record_alerts(2);

        let text = gather_metrics().unwrap();
        assert!(text.contains("alertrelay_requests_total{outcome=\"parse_failed\"}"));
        assert!(text.contains("alertrelay_alerts_received_total"));
    }
}
