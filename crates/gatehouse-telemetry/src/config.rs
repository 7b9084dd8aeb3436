//! Telemetry configuration.

use crate::logging::{LogConfig, DEFAULT_SERVICE_NAME};
use crate::metrics::MetricsConfig;

/// Configuration for all telemetry subsystems.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    /// Service name (used in metrics and logs).
    pub service_name: String,

    /// Logging configuration.
    pub logging: LogConfig,

    /// Metrics configuration.
    pub metrics: MetricsConfig,
}

impl TelemetryConfig {
    /// Creates a configuration with default subsystems for `service_name`.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self::default().with_service_name(service_name)
    }

    /// Sets the service name, propagating it to every subsystem.
    #[must_use]
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self.logging.service_name.clone_from(&self.service_name);
        self.metrics.service_name.clone_from(&self.service_name);
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn with_logging(mut self, logging: LogConfig) -> Self {
        self.logging = LogConfig {
            service_name: self.service_name.clone(),
            ..logging
        };
        self
    }

    /// Sets the metrics configuration.
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = MetricsConfig {
            service_name: self.service_name.clone(),
            ..metrics
        };
        self
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            logging: LogConfig::default(),
            metrics: MetricsConfig::disabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "gatehouse");
        assert!(config.logging.enabled);
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_service_name_propagates() {
        let config = TelemetryConfig::new("front-door");
        assert_eq!(config.logging.service_name, "front-door");
        assert_eq!(config.metrics.service_name, "front-door");
    }

    #[test]
    fn test_subsystems_keep_service_name() {
        let config = TelemetryConfig::new("front-door")
            .with_logging(LogConfig::development())
            .with_metrics(MetricsConfig::default());

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.service_name, "front-door");
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.service_name, "front-door");
    }
}
