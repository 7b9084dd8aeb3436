//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use gatehouse_core::{InMemoryCredentialStore, Route};
use gatehouse_telemetry::{LogConfig, MetricsConfig, TelemetryConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Credentials section: the identities known to the in-memory store.
///
/// # Example
///
/// ```
/// use gatehouse_config::CredentialsSection;
///
/// let section = CredentialsSection::default();
/// assert_eq!(section.users.get("admin").map(String::as_str), Some("admin"));
/// assert_eq!(section.users.len(), 2);
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    /// Identity to secret mapping.
    #[serde(default = "default_users")]
    pub users: BTreeMap<String, String>,
}

impl CredentialsSection {
    /// Builds a credential store holding these users.
    #[must_use]
    pub fn store(&self) -> InMemoryCredentialStore {
        self.users
            .iter()
            .map(|(identity, secret)| (identity.clone(), secret.clone()))
            .collect()
    }
}

impl Default for CredentialsSection {
    fn default() -> Self {
        Self {
            users: default_users(),
        }
    }
}

// Secrets stay out of logs
impl fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsSection")
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn default_users() -> BTreeMap<String, String> {
    [("admin", "admin"), ("user", "user")]
        .into_iter()
        .map(|(identity, secret)| (identity.to_string(), secret.to_string()))
        .collect()
}

/// Routing section: which identities land on the admin route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RoutingSection {
    /// Identities routed to [`Route::Admin`].
    #[serde(default = "default_privileged")]
    pub privileged: Vec<String>,

    /// Route granted when every gate continues without terminating.
    #[serde(default)]
    pub default_route: Route,
}

impl Default for RoutingSection {
    fn default() -> Self {
        Self {
            privileged: default_privileged(),
            default_route: Route::default(),
        }
    }
}

fn default_privileged() -> Vec<String> {
    vec!["admin".to_string()]
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Whether logging is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directives (e.g., "info", "gatehouse_pipeline=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Whether a Prometheus recorder is installed.
    #[serde(default)]
    pub enabled: bool,
}

/// Telemetry section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// Service name attached to logs and metrics.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,

    /// Metrics settings.
    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            logging: LoggingSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl TelemetrySection {
    /// Converts the logging settings into a [`LogConfig`].
    ///
    /// JSON output uses the production preset and pretty output the
    /// development preset; `enabled` and `level` always come from here.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let base = match self.logging.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        LogConfig {
            enabled: self.logging.enabled,
            ..base
        }
        .with_level(self.logging.level.clone())
        .with_service_name(self.service_name.clone())
    }

    /// Converts the metrics settings into a [`MetricsConfig`].
    #[must_use]
    pub fn metrics_config(&self) -> MetricsConfig {
        MetricsConfig {
            enabled: self.metrics.enabled,
            service_name: self.service_name.clone(),
            ..MetricsConfig::default()
        }
    }

    /// Converts the whole section into a [`TelemetryConfig`].
    #[must_use]
    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig::new(self.service_name.clone())
            .with_logging(self.log_config())
            .with_metrics(self.metrics_config())
    }
}

fn default_service_name() -> String {
    gatehouse_telemetry::logging::DEFAULT_SERVICE_NAME.to_string()
}

fn default_true() -> bool {
    true
}
