//! Gate decisions and login outcomes.
//!
//! A [`Decision`] is produced by every gate and by the pipeline as a whole.
//! [`LoginOutcome`] is the public, caller-facing projection of the pipeline's
//! terminal decision.
//!
//! | Decision            | LoginOutcome                 |
//! |---------------------|------------------------------|
//! | `Continue`          | `Granted { default route }`  |
//! | `Terminate(route)`  | `Granted { route }`          |
//! | `Reject(reason)`    | `Denied { reason }`          |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable reason a gate vetoed a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The identity is not a known principal.
    UnknownUser,
    /// The identity exists but the secret does not match.
    BadPassword,
}

impl RejectReason {
    /// Returns the stable code for this reason.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnknownUser => "unknown_user",
            Self::BadPassword => "bad_password",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Destination chosen for an authenticated principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Privileged (administrative) landing route.
    Admin,
    /// Regular landing route.
    #[default]
    Standard,
}

impl Route {
    /// Returns the stable name of this route.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verdict of a single gate, or of a whole pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "decision", content = "value", rename_all = "snake_case")]
pub enum Decision {
    /// No objection; evaluation proceeds to the next gate.
    Continue,
    /// Veto; evaluation halts immediately.
    Reject(RejectReason),
    /// Approve and halt; the route is not seen by later gates.
    Terminate(Route),
}

impl Decision {
    /// Returns true if evaluation must stop after this decision.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        !matches!(self, Self::Continue)
    }

    /// Returns true if this decision is a rejection.
    #[must_use]
    pub const fn is_reject(&self) -> bool {
        matches!(self, Self::Reject(_))
    }

    /// Returns a short label for logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Reject(_) => "reject",
            Self::Terminate(_) => "terminate",
        }
    }
}

/// Public result of a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    /// The attempt was accepted.
    Granted {
        /// Route chosen for the principal.
        route: Route,
    },
    /// The attempt was rejected.
    Denied {
        /// Why the attempt was rejected.
        reason: RejectReason,
    },
}

impl LoginOutcome {
    /// Maps a terminal pipeline decision onto an outcome.
    ///
    /// `default_route` is used when the pipeline accepted implicitly
    /// (the last gate returned `Continue`).
    #[must_use]
    pub const fn from_decision(decision: Decision, default_route: Route) -> Self {
        match decision {
            Decision::Continue => Self::Granted {
                route: default_route,
            },
            Decision::Terminate(route) => Self::Granted { route },
            Decision::Reject(reason) => Self::Denied { reason },
        }
    }

    /// Returns true if the login was granted.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// Returns the granted route, if any.
    #[must_use]
    pub const fn route(&self) -> Option<Route> {
        match self {
            Self::Granted { route } => Some(*route),
            Self::Denied { .. } => None,
        }
    }

    /// Returns the rejection reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Granted { .. } => None,
            Self::Denied { reason } => Some(*reason),
        }
    }

    /// Returns a short label for logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Granted { .. } => "granted",
            Self::Denied { .. } => "denied",
        }
    }
}

impl From<Decision> for LoginOutcome {
    fn from(decision: Decision) -> Self {
        Self::from_decision(decision, Route::default())
    }
}
