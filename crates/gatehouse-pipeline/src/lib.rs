//! # Gatehouse Pipeline
//!
//! Sequential gate pipeline for Gatehouse login evaluation.
//!
//! A login attempt flows through an ordered chain of gates. Each gate
//! returns one [`Decision`](gatehouse_core::Decision); the first `Reject` or
//! `Terminate` ends evaluation and no later gate runs.
//!
//! ## Canonical Pipeline
//!
//! ```text
//! LoginAttempt → UserExists → PasswordMatch → RoleRoute → Terminate(route)
//!                    │              │
//!                    ↓              ↓
//!          Reject(UnknownUser) Reject(BadPassword)
//! ```
//!
//! | Position | Gate            | Purpose                                 |
//! |----------|-----------------|-----------------------------------------|
//! | 1        | `user_exists`   | Reject identities the store doesn't know |
//! | 2        | `password_match`| Reject secrets that don't match          |
//! | 3        | `role_route`    | Pick `Admin` or `Standard`, then stop    |
//!
//! ## Key Features
//!
//! - **Frozen Order**: A pipeline is immutable once built and can be shared
//!   across tasks behind an `Arc`
//! - **Ordering Checks**: Gates declare prerequisites, verified at freeze
//! - **Open Extension**: Any [`Gate`] implementation can be appended
//! - **Async**: Gates are async so stores may perform I/O
//!
//! ## Example
//!
//! ```
//! use gatehouse_pipeline::GateKind;
//!
//! let kinds = GateKind::all();
//! assert_eq!(kinds.len(), 3);
//! assert_eq!(kinds[0].name(), "user_exists");
//! assert_eq!(kinds[2].name(), "role_route");
//! ```

#![doc(html_root_url = "https://docs.rs/gatehouse-pipeline/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod gate;
pub mod gates;
pub mod pipeline;

// Re-export main types at crate root
pub use gate::{FnGate, Gate, GateKind};
pub use gates::{PasswordMatchGate, RoleRouteGate, UserExistsGate};
pub use pipeline::{BoxedGate, Evaluation, GatePipeline, PipelineBuilder};
