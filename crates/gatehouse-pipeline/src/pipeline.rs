//! Immutable sequential gate pipeline.
//!
//! A pipeline is assembled with a [`PipelineBuilder`] and then frozen into a
//! [`GatePipeline`]. Freezing consumes the builder and validates ordering
//! preconditions; the frozen pipeline exposes no way to add, remove, or
//! reorder gates, so it can be shared across threads without locking.
//!
//! ## Evaluation
//!
//! Evaluation is a fold with early exit over the gates, in construction
//! order, one gate at a time:
//!
//! | Gate decision      | Pipeline action                               |
//! |--------------------|-----------------------------------------------|
//! | `Continue`         | run the next gate (`Continue` if none remain) |
//! | `Reject(reason)`   | stop, return the rejection                    |
//! | `Terminate(route)` | stop, return the route                        |
//! | error              | stop, propagate the error unchanged           |
//!
//! No gate after a `Reject` or `Terminate` runs.
//!
//! ## Ordering validation
//!
//! [`PipelineBuilder::freeze`] rejects pipelines where a gate appears before
//! one it [`requires`](crate::Gate::requires), or after a gate that
//! [`terminates`](crate::Gate::terminates).
//!
//! A frozen pipeline cannot be extended:
//!
//! ```compile_fail
//! use gatehouse_pipeline::{gates::RoleRouteGate, GatePipeline};
//!
//! let pipeline = GatePipeline::builder().freeze().unwrap();
//! let pipeline = pipeline.append(RoleRouteGate::default());
//! ```
//!
//! and a builder is gone once frozen:
//!
//! ```compile_fail
//! use gatehouse_pipeline::{gates::RoleRouteGate, GatePipeline};
//!
//! let builder = GatePipeline::builder();
//! let pipeline = builder.freeze().unwrap();
//! let builder = builder.append(RoleRouteGate::default());
//! ```

use crate::gate::Gate;
use gatehouse_core::{Decision, GatehouseResult, LoginAttempt, PipelineMisuse};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A type-erased gate that can be shared between pipelines.
pub type BoxedGate = Arc<dyn Gate>;

/// A frozen, ordered sequence of gates.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gatehouse_core::{Decision, InMemoryCredentialStore, LoginAttempt, RejectReason, Route};
/// use gatehouse_pipeline::gates::{PasswordMatchGate, RoleRouteGate, UserExistsGate};
/// use gatehouse_pipeline::GatePipeline;
///
/// # tokio_test::block_on(async {
/// let store = Arc::new(InMemoryCredentialStore::demo());
/// let pipeline = GatePipeline::builder()
///     .append(UserExistsGate::new(store.clone()))
///     .append(PasswordMatchGate::new(store))
///     .append(RoleRouteGate::default())
///     .freeze()
///     .unwrap();
///
/// let decision = pipeline.evaluate(&LoginAttempt::new("admin", "admin")).await.unwrap();
/// assert_eq!(decision, Decision::Terminate(Route::Admin));
///
/// let decision = pipeline.evaluate(&LoginAttempt::new("ghost", "x")).await.unwrap();
/// assert_eq!(decision, Decision::Reject(RejectReason::UnknownUser));
/// # });
/// ```
pub struct GatePipeline {
    gates: Box<[BoxedGate]>,
}

/// Result of a traced evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// The pipeline's terminal decision.
    pub decision: Decision,
    /// Name of the gate that ended evaluation, or `None` if every gate
    /// returned `Continue`.
    pub decided_by: Option<&'static str>,
    /// Number of gates that ran.
    pub gates_run: usize,
}

impl GatePipeline {
    /// Creates a new, empty pipeline builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Evaluates an attempt and returns the terminal decision.
    pub async fn evaluate(&self, attempt: &LoginAttempt) -> GatehouseResult<Decision> {
        self.evaluate_traced(attempt)
            .await
            .map(|evaluation| evaluation.decision)
    }

    /// Evaluates an attempt, also reporting which gate decided and how many
    /// gates ran.
    #[instrument(level = "debug", skip(self, attempt), fields(identity = %attempt.identity(), gates = self.gates.len()))]
    pub async fn evaluate_traced(&self, attempt: &LoginAttempt) -> GatehouseResult<Evaluation> {
        for (position, gate) in self.gates.iter().enumerate() {
            let decision = gate.evaluate(attempt).await.map_err(|err| {
                warn!(gate = gate.name(), position, error = %err, "gate failed");
                err
            })?;

            debug!(
                gate = gate.name(),
                position,
                decision = decision.label(),
                "gate decided"
            );

            if decision.is_final() {
                return Ok(Evaluation {
                    decision,
                    decided_by: Some(gate.name()),
                    gates_run: position + 1,
                });
            }
        }

        Ok(Evaluation {
            decision: Decision::Continue,
            decided_by: None,
            gates_run: self.gates.len(),
        })
    }

    /// Returns the names of all gates in order.
    #[must_use]
    pub fn gate_names(&self) -> Vec<&'static str> {
        self.gates.iter().map(|gate| gate.name()).collect()
    }

    /// Returns the number of gates.
    #[must_use]
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Returns true if the pipeline has no gates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl fmt::Debug for GatePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatePipeline")
            .field("gates", &self.gate_names())
            .finish()
    }
}

/// Builder for constructing a [`GatePipeline`].
///
/// Gates run in the order they are appended. Nothing is reordered.
#[derive(Default)]
pub struct PipelineBuilder {
    gates: Vec<BoxedGate>,
}

impl PipelineBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { gates: Vec::new() }
    }

    /// Appends a gate at the end of the sequence.
    #[must_use]
    pub fn append<G: Gate>(self, gate: G) -> Self {
        self.append_shared(Arc::new(gate))
    }

    /// Appends an already shared gate at the end of the sequence.
    #[must_use]
    pub fn append_shared(mut self, gate: BoxedGate) -> Self {
        self.gates.push(gate);
        self
    }

    /// Returns the number of gates appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns true if no gate has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Validates gate ordering and freezes the pipeline.
    ///
    /// # Errors
    ///
    /// - [`PipelineMisuse::MissingPrerequisite`] if a gate appears before a
    ///   gate it requires
    /// - [`PipelineMisuse::UnreachableGate`] if a gate appears after a gate
    ///   that always ends evaluation
    pub fn freeze(self) -> Result<GatePipeline, PipelineMisuse> {
        validate_order(&self.gates)?;
        Ok(self.freeze_unchecked())
    }

    /// Freezes the pipeline without validating gate ordering.
    ///
    /// Gates still run strictly in the order they were appended.
    #[must_use]
    pub fn freeze_unchecked(self) -> GatePipeline {
        GatePipeline {
            gates: self.gates.into_boxed_slice(),
        }
    }
}

fn validate_order(gates: &[BoxedGate]) -> Result<(), PipelineMisuse> {
    for (position, gate) in gates.iter().enumerate() {
        let earlier = &gates[..position];

        if let Some(terminator) = earlier.iter().find(|g| g.terminates()) {
            return Err(PipelineMisuse::unreachable_gate(
                gate.name(),
                position,
                terminator.name(),
            ));
        }

        for &required in gate.requires() {
            if !earlier.iter().any(|g| g.name() == required) {
                return Err(PipelineMisuse::missing_prerequisite(
                    gate.name(),
                    position,
                    required,
                ));
            }
        }
    }
    Ok(())
}
