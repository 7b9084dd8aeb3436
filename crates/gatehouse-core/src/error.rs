//! Error types for Gatehouse.
//!
//! Rejecting a login is not an error: `UnknownUser` and `BadPassword` are
//! ordinary [`Decision`](crate::Decision) values. The types here cover the
//! two genuine failure classes:
//!
//! | Class | Type | Raised by |
//! |---|---|---|
//! | Programmer error | [`PipelineMisuse`] | pipeline assembly (`freeze`) |
//! | Collaborator failure | [`StoreError`] | [`CredentialStore`](crate::CredentialStore) implementations |
//!
//! Both are carried by [`GatehouseError`] and propagate to the caller of
//! `login`/`evaluate` unchanged. A store outage is never reported as a
//! denied login.

use thiserror::Error;

/// Result type alias using [`GatehouseError`].
pub type GatehouseResult<T> = Result<T, GatehouseError>;

/// Result type alias for credential store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Standard error type for Gatehouse.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatehouseError {
    /// The pipeline was assembled in violation of a gate precondition.
    ///
    /// `freeze` returns a bare [`PipelineMisuse`]; this variant lets code that
    /// assembles and runs a pipeline in one function use `?` for both steps.
    /// Evaluation itself never produces it.
    #[error("pipeline misuse: {0}")]
    PipelineMisuse(#[from] PipelineMisuse),

    /// The credential store failed to answer.
    #[error("credential store failure: {0}")]
    Store(#[from] StoreError),
}

impl GatehouseError {
    /// Check if this error is a pipeline assembly error.
    pub const fn is_misuse(&self) -> bool {
        matches!(self, Self::PipelineMisuse(_))
    }

    /// Check if this error came from the credential store.
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Check if retrying the same login could succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Store(StoreError::Unavailable(_) | StoreError::Io(_))
        )
    }
}

/// Violations of gate ordering preconditions, detected when a pipeline is frozen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PipelineMisuse {
    /// A gate was appended before a gate it depends on.
    #[error("gate `{gate}` at position {position} requires `{requires}` to run before it")]
    MissingPrerequisite {
        /// Name of the dependent gate.
        gate: &'static str,
        /// Zero-based position of the dependent gate.
        position: usize,
        /// Name of the gate that must precede it.
        requires: &'static str,
    },

    /// A gate was appended after a gate that always ends evaluation.
    #[error("gate `{gate}` at position {position} can never run: `{terminator}` always ends evaluation")]
    UnreachableGate {
        /// Name of the unreachable gate.
        gate: &'static str,
        /// Zero-based position of the unreachable gate.
        position: usize,
        /// Name of the terminating gate before it.
        terminator: &'static str,
    },
}

impl PipelineMisuse {
    /// Create a missing prerequisite error.
    pub const fn missing_prerequisite(
        gate: &'static str,
        position: usize,
        requires: &'static str,
    ) -> Self {
        Self::MissingPrerequisite {
            gate,
            position,
            requires,
        }
    }

    /// Create an unreachable gate error.
    pub const fn unreachable_gate(
        gate: &'static str,
        position: usize,
        terminator: &'static str,
    ) -> Self {
        Self::UnreachableGate {
            gate,
            position,
            terminator,
        }
    }

    /// Returns the name of the offending gate.
    pub const fn gate(&self) -> &'static str {
        match self {
            Self::MissingPrerequisite { gate, .. } | Self::UnreachableGate { gate, .. } => *gate,
        }
    }
}

/// Errors raised by credential store implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store backend reported an error.
    #[error("store backend error: {message}")]
    Backend {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Create a backend error wrapping its source.
    pub fn backend(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_prerequisite_display() {
        let err = PipelineMisuse::missing_prerequisite("password_match", 0, "user_exists");
        assert_eq!(
            err.to_string(),
            "gate `password_match` at position 0 requires `user_exists` to run before it"
        );
        assert_eq!(err.gate(), "password_match");
    }

    #[test]
    fn test_unreachable_gate_display() {
        let err = PipelineMisuse::unreachable_gate("password_match", 2, "role_route");
        assert!(err.to_string().contains("can never run"));
        assert!(err.to_string().contains("role_route"));
    }

    #[test]
    fn test_misuse_conversion() {
        let err: GatehouseError =
            PipelineMisuse::missing_prerequisite("password_match", 0, "user_exists").into();
        assert!(err.is_misuse());
        assert!(!err.is_store_failure());
        assert!(!err.is_retryable());
        assert!(err.to_string().starts_with("pipeline misuse:"));
    }

    #[test]
    fn test_store_error_conversion() {
        let err: GatehouseError = StoreError::unavailable("connection refused").into();
        assert!(err.is_store_failure());
        assert!(err.is_retryable());
        assert_eq!(
            err.to_string(),
            "credential store failure: store unavailable: connection refused"
        );
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let io = std::io::Error::other("disk on fire");
        let err = StoreError::backend("lookup failed", io);
        assert_eq!(err.to_string(), "store backend error: lookup failed");
        assert!(err.source().is_some());

        let wrapped: GatehouseError = err.into();
        assert!(!wrapped.is_retryable());
    }
}
