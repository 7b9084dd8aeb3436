//! # Gatehouse
//!
//! **Login evaluation as an ordered chain of gates**
//!
//! Gatehouse decides whether a login attempt is accepted and where an
//! accepted principal lands. Each check is a separate [`Gate`]; gates are
//! assembled once into an immutable [`GatePipeline`] and evaluated in order,
//! stopping at the first rejection or terminal route.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use gatehouse::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let service = LoginService::standard(
//!     Arc::new(InMemoryCredentialStore::demo()),
//!     RoleRouteGate::default(),
//! );
//!
//! let outcome = service.login("admin", "admin").await.unwrap();
//! assert_eq!(outcome, LoginOutcome::Granted { route: Route::Admin });
//!
//! let outcome = service.login("admin", "12345").await.unwrap();
//! assert_eq!(outcome, LoginOutcome::Denied { reason: RejectReason::BadPassword });
//! # });
//! ```
//!
//! ## Architecture
//!
//! ```text
//! login(identity, secret)
//!   → UserExists → PasswordMatch → RoleRoute
//!   → Decision → LoginOutcome { Granted(route) | Denied(reason) }
//! ```
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | [`core`] | Attempts, decisions, outcomes, errors, credential stores |
//! | [`pipeline`] | `Gate` trait, built-in gates, `GatePipeline` |
//! | [`telemetry`] | Logging initialization and login metrics |
//! | [`config`] | Layered TOML/JSON/env configuration |

#![doc(html_root_url = "https://docs.rs/gatehouse/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod service;

pub use service::LoginService;

// Re-export core types
pub use gatehouse_core as core;

// Re-export pipeline types
pub use gatehouse_pipeline as pipeline;

// Re-export telemetry
pub use gatehouse_telemetry as telemetry;

// Re-export configuration
pub use gatehouse_config as config;

pub use gatehouse_pipeline::{Gate, GatePipeline};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use gatehouse::prelude::*;
///
/// let pipeline = GatePipeline::builder().freeze().unwrap();
/// assert!(pipeline.is_empty());
/// ```
pub mod prelude {
    pub use crate::LoginService;

    pub use gatehouse_core::{
        BoxFuture, CredentialStore, Decision, GatehouseError, GatehouseResult,
        InMemoryCredentialStore, LoginAttempt, LoginOutcome, PipelineMisuse, RejectReason, Route,
        StoreError,
    };

    pub use gatehouse_pipeline::{
        Evaluation, FnGate, Gate, GateKind, GatePipeline, PasswordMatchGate, PipelineBuilder,
        RoleRouteGate, UserExistsGate,
    };

    pub use gatehouse_config::{ConfigLoader, GatehouseConfig};
}
