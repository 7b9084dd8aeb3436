//! Structured logging and login metrics for Gatehouse.
//!
//! - **Logging**: `tracing-subscriber` with JSON or pretty output
//! - **Metrics**: Prometheus-format counters and histograms via the `metrics` crate
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `gatehouse_logins_total` | Counter | `outcome`, `reason` | Login attempts |
//! | `gatehouse_login_duration_seconds` | Histogram | `outcome` | Evaluation latency |
//! | `gatehouse_gate_decisions_total` | Counter | `gate`, `decision` | Per-gate decisions |
//!
//! # Example
//!
//! ```rust,ignore
//! use gatehouse_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let telemetry = init_telemetry(&TelemetryConfig::new("gatehouse"))?;
//! if let Some(metrics) = telemetry.metrics() {
//!     println!("{}", metrics.render());
//! }
//! ```
//!
//! Rendered output looks like:
//!
//! ```text
//! # HELP gatehouse_logins_total Total number of login attempts by outcome and rejection reason
//! # TYPE gatehouse_logins_total counter
//! gatehouse_logins_total{service="gatehouse",outcome="granted",reason="none"} 12
//! gatehouse_logins_total{service="gatehouse",outcome="denied",reason="bad_password"} 3
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig, LogWriter};
pub use metrics::{init_metrics, record_gate_decision, record_login, MetricsConfig, MetricsRegistry};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Handles to the telemetry subsystems that were installed.
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    metrics: Option<MetricsRegistry>,
}

impl Telemetry {
    /// Returns the metrics registry, if metrics are enabled.
    #[must_use]
    pub fn metrics(&self) -> Option<&MetricsRegistry> {
        self.metrics.as_ref()
    }
}

/// Initializes all telemetry subsystems.
///
/// Logging is initialized first so that metrics setup can be logged.
///
/// # Errors
///
/// Returns `TelemetryError` if any subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<Telemetry> {
    init_logging(&config.logging)?;
    let metrics = init_metrics(&config.metrics)?;

    if metrics.is_some() {
        tracing::debug!(service = %config.service_name, "Metrics recorder installed");
    }

    Ok(Telemetry { metrics })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_disabled_installs_nothing() {
        let config = TelemetryConfig::default()
            .with_logging(LogConfig::disabled())
            .with_metrics(MetricsConfig::disabled());

        let telemetry = init_telemetry(&config).unwrap();
        assert!(telemetry.metrics().is_none());
    }

    #[test]
    fn test_invalid_level_fails_init() {
        let config = TelemetryConfig::default()
            .with_logging(LogConfig::production().with_level("gatehouse=loud"));

        let err = init_telemetry(&config).unwrap_err();
        assert!(matches!(err, TelemetryError::LoggingInit(_)));
    }
}
