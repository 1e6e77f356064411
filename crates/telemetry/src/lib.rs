//! Logging, metrics, and timing for summit-tools
//!
//! - [`init_with_config`] installs the `tracing` subscriber (compact or JSON, on stderr)
//! - [`metrics`] is the process-wide registry served by `/metrics`
//! - [`Timer`] feeds lookup latencies into a histogram

mod logging;
mod metrics;
mod timer;

use once_cell::sync::Lazy;
use uuid::Uuid;

pub use logging::{init, init_with_config, TelemetryConfig};
pub use metrics::{metrics, HistogramSummary, MetricsRegistry, MetricsSnapshot, MAX_SAMPLES};
pub use timer::Timer;

static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Random id of this process, logged at startup and exported with metrics
pub fn session_id() -> &'static str {
    &SESSION_ID
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_is_stable_uuid() {
        let id = session_id();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(id, session_id());
    }
}
