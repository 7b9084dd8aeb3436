//! Main configuration types.
//!
//! This module provides the top-level [`GatehouseConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, CredentialsSection, LogFormat, RoutingSection, TelemetrySection};

/// Complete Gatehouse configuration.
///
/// This is the root configuration type that contains all configuration sections.
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use gatehouse_config::GatehouseConfig;
///
/// let config = GatehouseConfig::default();
/// assert_eq!(config.routing.privileged, vec!["admin"]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct GatehouseConfig {
    /// Known identities and their secrets.
    #[serde(default)]
    pub credentials: CredentialsSection,

    /// Route selection.
    #[serde(default)]
    pub routing: RoutingSection,

    /// Logging and metrics.
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl GatehouseConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use gatehouse_config::{GatehouseConfig, RoutingSection};
    ///
    /// let config = GatehouseConfig::builder()
    ///     .routing(RoutingSection {
    ///         privileged: vec!["root".to_string()],
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.routing.privileged, vec!["root"]);
    /// ```
    #[must_use]
    pub fn builder() -> GatehouseConfigBuilder {
        GatehouseConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - A credential identity is empty
    /// - A privileged identity is empty
    /// - The service name is empty
    /// - The log level is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.users.keys().any(String::is_empty) {
            return Err(ConfigError::invalid_value(
                "credentials.users",
                "identities must not be empty",
            ));
        }

        if self.routing.privileged.iter().any(String::is_empty) {
            return Err(ConfigError::invalid_value(
                "routing.privileged",
                "identities must not be empty",
            ));
        }

        if self.telemetry.service_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "telemetry.service_name",
                "must not be empty",
            ));
        }

        if self.telemetry.logging.enabled {
            self.telemetry
                .log_config()
                .validate()
                .map_err(|e| ConfigError::invalid_value("telemetry.logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, debug-level logging so each gate decision is visible.
    ///
    /// # Example
    ///
    /// ```
    /// use gatehouse_config::GatehouseConfig;
    ///
    /// let config = GatehouseConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logging at `info` with metrics enabled.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "info".to_string();
        config.telemetry.logging.format = LogFormat::Json;
        config.telemetry.metrics.enabled = true;
        config
    }
}

/// Builder for [`GatehouseConfig`].
#[derive(Debug, Default)]
pub struct GatehouseConfigBuilder {
    credentials: Option<CredentialsSection>,
    routing: Option<RoutingSection>,
    telemetry: Option<TelemetrySection>,
}

impl GatehouseConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the credentials section.
    #[must_use]
    pub fn credentials(mut self, credentials: CredentialsSection) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Add a single user, starting from an empty credential set.
    #[must_use]
    pub fn user(mut self, identity: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials
            .get_or_insert_with(|| CredentialsSection {
                users: Default::default(),
            })
            .users
            .insert(identity.into(), secret.into());
        self
    }

    /// Set the routing section.
    #[must_use]
    pub fn routing(mut self, routing: RoutingSection) -> Self {
        self.routing = Some(routing);
        self
    }

    /// Set the telemetry section.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetrySection) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> GatehouseConfig {
        GatehouseConfig {
            credentials: self.credentials.unwrap_or_default(),
            routing: self.routing.unwrap_or_default(),
            telemetry: self.telemetry.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::Route;

    #[test]
    fn test_default_config_is_valid() {
        let config = GatehouseConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.credentials.users.len(), 2);
        assert_eq!(config.routing.default_route, Route::Standard);
    }

    #[test]
    fn test_presets() {
        let dev = GatehouseConfig::development();
        assert_eq!(dev.telemetry.logging.format, LogFormat::Pretty);
        assert!(dev.validate().is_ok());

        let prod = GatehouseConfig::production();
        assert_eq!(prod.telemetry.logging.format, LogFormat::Json);
        assert!(prod.telemetry.metrics.enabled);
    }

    #[test]
    fn test_builder_user_replaces_defaults() {
        let config = GatehouseConfig::builder()
            .user("ops", "s3cret")
            .user("root", "toor")
            .build();

        assert_eq!(config.credentials.users.len(), 2);
        assert!(config.credentials.users.contains_key("ops"));
        assert!(!config.credentials.users.contains_key("admin"));
    }

    #[test]
    fn test_empty_identity_rejected() {
        let config = GatehouseConfig::builder().user("", "x").build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("credentials.users"));
    }

    #[test]
    fn test_empty_privileged_identity_rejected() {
        let config = GatehouseConfig::builder()
            .routing(RoutingSection {
                privileged: vec![String::new()],
                ..Default::default()
            })
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("routing.privileged"));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = GatehouseConfig::default();
        config.telemetry.logging.level = "gatehouse=loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("telemetry.logging.level"));

        // Ignored while logging is off
        config.telemetry.logging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_service_name_rejected() {
        let mut config = GatehouseConfig::default();
        config.telemetry.service_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_preserves_sections() {
        let config = GatehouseConfig::development();
        let text = toml::to_string(&config).unwrap();
        let parsed: GatehouseConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
