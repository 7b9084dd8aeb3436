//! Core gate trait and types.
//!
//! This module defines the [`Gate`] trait that every pipeline link
//! implements. A gate inspects a [`LoginAttempt`] and returns exactly one
//! [`Decision`]. Gates never call each other: ordering and short-circuiting
//! belong to the [`GatePipeline`](crate::GatePipeline).
//!
//! # Example
//!
//! ```
//! use gatehouse_core::{BoxFuture, Decision, GatehouseResult, LoginAttempt, RejectReason};
//! use gatehouse_pipeline::Gate;
//!
//! struct DenyEmptySecret;
//!
//! impl Gate for DenyEmptySecret {
//!     fn name(&self) -> &'static str {
//!         "deny_empty_secret"
//!     }
//!
//!     fn evaluate<'a>(
//!         &'a self,
//!         attempt: &'a LoginAttempt,
//!     ) -> BoxFuture<'a, GatehouseResult<Decision>> {
//!         Box::pin(async move {
//!             if attempt.secret().is_empty() {
//!                 Ok(Decision::Reject(RejectReason::BadPassword))
//!             } else {
//!                 Ok(Decision::Continue)
//!             }
//!         })
//!     }
//! }
//! ```

use gatehouse_core::{BoxFuture, Decision, GatehouseResult, LoginAttempt};
use std::fmt;

/// The core gate trait.
///
/// # Invariants
///
/// - A gate MUST return exactly one decision per evaluation
/// - A gate MUST NOT mutate shared state; gates are reused across
///   concurrent evaluations
/// - A gate SHOULD query each collaborator at most once per evaluation
/// - Collaborator failures MUST be returned as errors, never as `Reject`
pub trait Gate: Send + Sync + 'static {
    /// Returns the unique name of this gate.
    ///
    /// This name is used for logging, metrics, and ordering validation.
    fn name(&self) -> &'static str;

    /// Names of gates that must appear earlier in any pipeline containing
    /// this gate.
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns true if this gate always ends evaluation (never returns
    /// `Continue`). No gate may be appended after it.
    fn terminates(&self) -> bool {
        false
    }

    /// Evaluates the attempt.
    fn evaluate<'a>(&'a self, attempt: &'a LoginAttempt) -> BoxFuture<'a, GatehouseResult<Decision>>;
}

/// Built-in gate kinds, in canonical pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum GateKind {
    /// The identity must be a known principal.
    UserExists = 1,
    /// The secret must match the stored secret.
    PasswordMatch = 2,
    /// Chooses the landing route and ends evaluation.
    RoleRoute = 3,
}

const USER_EXISTS: &str = "user_exists";
const PASSWORD_MATCH: &str = "password_match";
const ROLE_ROUTE: &str = "role_route";

impl GateKind {
    /// Returns the gate name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserExists => USER_EXISTS,
            Self::PasswordMatch => PASSWORD_MATCH,
            Self::RoleRoute => ROLE_ROUTE,
        }
    }

    /// Returns the names of the gates this kind depends on.
    #[must_use]
    pub const fn requires(self) -> &'static [&'static str] {
        match self {
            Self::UserExists | Self::RoleRoute => &[],
            Self::PasswordMatch => &[USER_EXISTS],
        }
    }

    /// Returns true if gates of this kind always end evaluation.
    #[must_use]
    pub const fn terminates(self) -> bool {
        matches!(self, Self::RoleRoute)
    }

    /// Returns all built-in kinds in order.
    #[must_use]
    pub const fn all() -> [GateKind; 3] {
        [Self::UserExists, Self::PasswordMatch, Self::RoleRoute]
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A gate created from a synchronous function.
///
/// This allows defining simple policy gates without implementing the trait
/// directly.
///
/// # Example
///
/// ```
/// use gatehouse_core::{Decision, RejectReason};
/// use gatehouse_pipeline::{FnGate, Gate};
///
/// let gate = FnGate::new("no_root", |attempt| {
///     if attempt.identity() == "root" {
///         Decision::Reject(RejectReason::UnknownUser)
///     } else {
///         Decision::Continue
///     }
/// })
/// .requiring(&["user_exists"]);
///
/// assert_eq!(gate.name(), "no_root");
/// assert_eq!(gate.requires(), &["user_exists"]);
/// ```
pub struct FnGate<F> {
    name: &'static str,
    requires: &'static [&'static str],
    terminates: bool,
    func: F,
}

impl<F> FnGate<F>
where
    F: Fn(&LoginAttempt) -> Decision + Send + Sync + 'static,
{
    /// Creates a new function-based gate.
    pub fn new(name: &'static str, func: F) -> Self {
        Self {
            name,
            requires: &[],
            terminates: false,
            func,
        }
    }
}

impl<F> FnGate<F> {
    /// Declares the gates that must precede this one.
    #[must_use]
    pub const fn requiring(mut self, requires: &'static [&'static str]) -> Self {
        self.requires = requires;
        self
    }

    /// Declares that this gate always ends evaluation.
    #[must_use]
    pub const fn terminating(mut self) -> Self {
        self.terminates = true;
        self
    }
}

impl<F> fmt::Debug for FnGate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGate")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("terminates", &self.terminates)
            .finish_non_exhaustive()
    }
}

impl<F> Gate for FnGate<F>
where
    F: Fn(&LoginAttempt) -> Decision + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn requires(&self) -> &'static [&'static str] {
        self.requires
    }

    fn terminates(&self) -> bool {
        self.terminates
    }

    fn evaluate<'a>(&'a self, attempt: &'a LoginAttempt) -> BoxFuture<'a, GatehouseResult<Decision>> {
        Box::pin(async move { Ok((self.func)(attempt)) })
    }
}
