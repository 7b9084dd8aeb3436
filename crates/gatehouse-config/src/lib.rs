//! Typed configuration system for Gatehouse.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! The configuration system is built around the [`GatehouseConfig`] struct:
//!
//! - [`CredentialsSection`] - Identities and secrets for the in-memory store
//! - [`RoutingSection`] - Privileged identities and the default route
//! - [`TelemetrySection`] - Logging and metrics settings
//!
//! # Example
//!
//! ```no_run
//! use gatehouse_config::ConfigLoader;
//!
//! # fn main() -> Result<(), gatehouse_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("gatehouse.toml")?
//!     .with_env_prefix("GATEHOUSE")
//!     .load()?;
//!
//! println!("Privileged identities: {:?}", config.routing.privileged);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [credentials]
//! users = { admin = "admin", user = "user" }
//!
//! [routing]
//! privileged = ["admin"]
//! default_route = "standard"
//!
//! [telemetry]
//! service_name = "gatehouse"
//!
//! [telemetry.logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [telemetry.metrics]
//! enabled = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`. For example:
//!
//! - `GATEHOUSE__CREDENTIALS__USERS=admin:admin,ops:hunter2`
//! - `GATEHOUSE__ROUTING__PRIVILEGED=admin,ops`
//! - `GATEHOUSE__TELEMETRY__LOGGING__LEVEL=debug`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
