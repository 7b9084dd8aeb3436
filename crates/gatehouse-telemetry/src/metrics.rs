//! Prometheus metrics for Gatehouse.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `gatehouse_logins_total` | Counter | `outcome`, `reason` | Login attempts by outcome |
//! | `gatehouse_login_duration_seconds` | Histogram | `outcome` | Login evaluation latency |
//! | `gatehouse_gate_decisions_total` | Counter | `gate`, `decision` | Decisions returned by each gate |
//!
//! Recording functions are free functions over the `metrics` facade. They
//! are no-ops until a recorder is installed, so the login path records
//! unconditionally.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use gatehouse_telemetry::metrics::{build_recorder, record_login, MetricsConfig};
//!
//! let (recorder, registry) = build_recorder(&MetricsConfig::default()).unwrap();
//! metrics::with_local_recorder(&recorder, || {
//!     record_login("denied", Some("bad_password"), Duration::from_millis(3));
//! });
//! assert!(registry.render().contains("gatehouse_logins_total"));
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use std::time::Duration;

/// Metric names.
pub mod names {
    /// Login attempts counter.
    pub const LOGINS_TOTAL: &str = "gatehouse_logins_total";

    /// Login evaluation latency histogram.
    pub const LOGIN_DURATION_SECONDS: &str = "gatehouse_login_duration_seconds";

    /// Per-gate decision counter.
    pub const GATE_DECISIONS_TOTAL: &str = "gatehouse_gate_decisions_total";
}

/// Label value used for `reason` when a login is granted.
pub const NO_REASON: &str = "none";

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Service name attached to every metric as the `service` label.
    pub service_name: String,

    /// Histogram buckets for login duration, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_name: crate::logging::DEFAULT_SERVICE_NAME.to_string(),
            // 100us up to 1s; in-memory stores answer in microseconds
            duration_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Creates a configuration with metrics disabled.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Handle for rendering recorded metrics in Prometheus text format.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    handle: PrometheusHandle,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with the given handle.
    #[must_use]
    pub fn new(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// Renders all metrics in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

fn builder(config: &MetricsConfig) -> TelemetryResult<PrometheusBuilder> {
    if config.duration_buckets.is_empty() {
        return Err(TelemetryError::InvalidConfig(
            "duration_buckets must not be empty".to_string(),
        ));
    }

    PrometheusBuilder::new()
        .add_global_label("service", config.service_name.clone())
        .set_buckets_for_metric(
            Matcher::Full(names::LOGIN_DURATION_SECONDS.to_string()),
            &config.duration_buckets,
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Builds a recorder without installing it globally.
///
/// Pair with [`metrics::with_local_recorder`] to scope recording to a
/// closure.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidConfig` if no buckets are configured.
pub fn build_recorder(
    config: &MetricsConfig,
) -> TelemetryResult<(PrometheusRecorder, MetricsRegistry)> {
    let recorder = builder(config)?.build_recorder();
    let registry = MetricsRegistry::new(recorder.handle());
    Ok((recorder, registry))
}

/// Initializes the metrics subsystem by installing a global recorder.
///
/// Returns `None` when metrics are disabled.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<Option<MetricsRegistry>> {
    if !config.enabled {
        return Ok(None);
    }

    let handle = builder(config)?
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    register_metric_descriptions();

    Ok(Some(MetricsRegistry::new(handle)))
}

/// Registers descriptions for all standard metrics with the current recorder.
pub fn register_metric_descriptions() {
    describe_counter!(
        names::LOGINS_TOTAL,
        "Total number of login attempts by outcome and rejection reason"
    );
    describe_histogram!(
        names::LOGIN_DURATION_SECONDS,
        Unit::Seconds,
        "Time spent evaluating a login attempt"
    );
    describe_counter!(
        names::GATE_DECISIONS_TOTAL,
        "Total number of decisions returned by each gate"
    );
}

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Records a completed login.
///
/// Updates the following metrics:
/// - `gatehouse_logins_total` (incremented)
/// - `gatehouse_login_duration_seconds` (histogram observation)
///
/// # Arguments
///
/// * `outcome` - Outcome label ("granted", "denied")
/// * `reason` - Rejection code for denied logins
/// * `duration` - Evaluation duration
pub fn record_login(outcome: &'static str, reason: Option<&'static str>, duration: Duration) {
    counter!(
        names::LOGINS_TOTAL,
        "outcome" => outcome,
        "reason" => reason.unwrap_or(NO_REASON)
    )
    .increment(1);

    histogram!(names::LOGIN_DURATION_SECONDS, "outcome" => outcome)
        .record(duration.as_secs_f64());
}

/// Records a single gate decision.
pub fn record_gate_decision(gate: &'static str, decision: &'static str) {
    counter!(
        names::GATE_DECISIONS_TOTAL,
        "gate" => gate,
        "decision" => decision
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> (PrometheusRecorder, MetricsRegistry) {
        build_recorder(&MetricsConfig::default()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.service_name, "gatehouse");
        assert!(!config.duration_buckets.is_empty());
        assert!(!MetricsConfig::disabled().enabled);
    }

    #[test]
    fn test_empty_buckets_rejected() {
        let config = MetricsConfig {
            duration_buckets: Vec::new(),
            ..MetricsConfig::default()
        };
        let err = build_recorder(&config).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidConfig(_)));
    }

    #[test]
    fn test_disabled_init_installs_nothing() {
        let registry = init_metrics(&MetricsConfig::disabled()).unwrap();
        assert!(registry.is_none());
    }

    #[test]
    fn test_record_login_counts_by_outcome() {
        let (recorder, registry) = local();
        metrics::with_local_recorder(&recorder, || {
            record_login("granted", None, Duration::from_micros(250));
            record_login("granted", None, Duration::from_micros(300));
            record_login("denied", Some("unknown_user"), Duration::from_micros(80));
        });

        let output = registry.render();
        assert!(output.contains(names::LOGINS_TOTAL));
        assert!(output.contains("outcome=\"granted\""));
        assert!(output.contains("reason=\"none\""));
        assert!(output.contains("reason=\"unknown_user\""));
        assert!(output.contains("service=\"gatehouse\""));
        assert!(output.contains(names::LOGIN_DURATION_SECONDS));
    }

    #[test]
    fn test_record_gate_decision() {
        let (recorder, registry) = local();
        metrics::with_local_recorder(&recorder, || {
            record_gate_decision("user_exists", "continue");
            record_gate_decision("password_match", "reject");
        });

        let output = registry.render();
        assert!(output.contains(names::GATE_DECISIONS_TOTAL));
        assert!(output.contains("gate=\"password_match\""));
        assert!(output.contains("decision=\"reject\""));
    }

    #[test]
    fn test_descriptions_rendered() {
        let (recorder, registry) = local();
        metrics::with_local_recorder(&recorder, || {
            register_metric_descriptions();
            record_gate_decision("role_route", "terminate");
        });

        let output = registry.render();
        assert!(output.contains("# HELP gatehouse_gate_decisions_total"));
    }

    #[test]
    fn test_record_functions_dont_panic_without_recorder() {
        record_login("denied", Some("bad_password"), Duration::from_millis(1));
        record_gate_decision("user_exists", "continue");
    }
}
