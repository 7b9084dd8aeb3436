//! # Gatehouse Core
//!
//! Core types and traits for the Gatehouse login gate pipeline.
//!
//! This crate provides the foundational types used throughout Gatehouse:
//!
//! - [`LoginAttempt`] - Immutable identity/secret pair evaluated by gates
//! - [`Decision`] - Three-state verdict (`Continue`, `Reject`, `Terminate`)
//! - [`LoginOutcome`] - Public result of a login (`Granted` or `Denied`)
//! - [`CredentialStore`] - Credential lookup collaborator consumed by gates
//! - [`GatehouseError`] - Standard error type (pipeline misuse, store failures)

#![doc(html_root_url = "https://docs.rs/gatehouse-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod attempt;
mod decision;
mod error;
pub mod fixtures;
mod store;

pub use attempt::LoginAttempt;
pub use decision::{Decision, LoginOutcome, RejectReason, Route};
pub use error::{GatehouseError, GatehouseResult, PipelineMisuse, StoreError, StoreResult};
pub use store::{BoxFuture, CredentialStore, InMemoryCredentialStore};
