//! Identity existence gate.
//!
//! Rejects attempts whose identity is unknown to the credential store.
//! Every gate that reads a stored secret depends on this gate running first.

use crate::gate::{Gate, GateKind};
use gatehouse_core::{
    BoxFuture, CredentialStore, Decision, GatehouseResult, LoginAttempt, RejectReason,
};
use std::fmt;
use std::sync::Arc;

/// Gate that rejects unknown identities with [`RejectReason::UnknownUser`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gatehouse_core::{Decision, InMemoryCredentialStore, LoginAttempt, RejectReason};
/// use gatehouse_pipeline::{gates::UserExistsGate, Gate};
///
/// # tokio_test::block_on(async {
/// let gate = UserExistsGate::new(Arc::new(InMemoryCredentialStore::demo()));
/// let decision = gate.evaluate(&LoginAttempt::new("ghost", "x")).await.unwrap();
/// assert_eq!(decision, Decision::Reject(RejectReason::UnknownUser));
/// # });
/// ```
#[derive(Clone)]
pub struct UserExistsGate {
    store: Arc<dyn CredentialStore>,
}

impl UserExistsGate {
    /// Creates a gate reading from `store`.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    async fn check(&self, attempt: &LoginAttempt) -> GatehouseResult<Decision> {
        if self.store.user_exists(attempt.identity()).await? {
            Ok(Decision::Continue)
        } else {
            Ok(Decision::Reject(RejectReason::UnknownUser))
        }
    }
}

impl fmt::Debug for UserExistsGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserExistsGate").finish_non_exhaustive()
    }
}

impl Gate for UserExistsGate {
    fn name(&self) -> &'static str {
        GateKind::UserExists.name()
    }

    fn requires(&self) -> &'static [&'static str] {
        GateKind::UserExists.requires()
    }

    fn evaluate<'a>(&'a self, attempt: &'a LoginAttempt) -> BoxFuture<'a, GatehouseResult<Decision>> {
        Box::pin(self.check(attempt))
    }
}
