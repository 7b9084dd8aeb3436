//! Secret verification gate.
//!
//! Rejects attempts whose secret does not match the stored one. This gate
//! assumes the identity exists, so it declares `user_exists` as a
//! prerequisite and [`PipelineBuilder::freeze`](crate::PipelineBuilder::freeze)
//! refuses pipelines that place it first.

use crate::gate::{Gate, GateKind};
use gatehouse_core::{
    BoxFuture, CredentialStore, Decision, GatehouseResult, LoginAttempt, RejectReason,
};
use std::fmt;
use std::sync::Arc;

/// Gate that rejects wrong secrets with [`RejectReason::BadPassword`].
#[derive(Clone)]
pub struct PasswordMatchGate {
    store: Arc<dyn CredentialStore>,
}

impl PasswordMatchGate {
    /// Creates a gate reading from `store`.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    async fn check(&self, attempt: &LoginAttempt) -> GatehouseResult<Decision> {
        let matched = self
            .store
            .verify_password(attempt.identity(), attempt.secret())
            .await?;

        if matched {
            Ok(Decision::Continue)
        } else {
            Ok(Decision::Reject(RejectReason::BadPassword))
        }
    }
}

impl fmt::Debug for PasswordMatchGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordMatchGate").finish_non_exhaustive()
    }
}

impl Gate for PasswordMatchGate {
    fn name(&self) -> &'static str {
        GateKind::PasswordMatch.name()
    }

    fn requires(&self) -> &'static [&'static str] {
        GateKind::PasswordMatch.requires()
    }

    fn evaluate<'a>(&'a self, attempt: &'a LoginAttempt) -> BoxFuture<'a, GatehouseResult<Decision>> {
        Box::pin(self.check(attempt))
    }
}
