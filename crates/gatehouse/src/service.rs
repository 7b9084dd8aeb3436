//! Login service.
//!
//! [`LoginService`] owns a frozen pipeline and maps its terminal decision
//! onto a [`LoginOutcome`]. It adds logging and metrics around evaluation
//! and nothing else: every accept/reject rule lives in a gate.

use std::sync::Arc;
use std::time::Instant;

use gatehouse_config::GatehouseConfig;
use gatehouse_core::{
    CredentialStore, GatehouseResult, InMemoryCredentialStore, LoginAttempt, LoginOutcome,
    RejectReason, Route,
};
use gatehouse_pipeline::{Evaluation, GatePipeline, PasswordMatchGate, RoleRouteGate, UserExistsGate};
use gatehouse_telemetry::{record_gate_decision, record_login};
use tracing::{info, instrument, warn};

/// Public entry point for login attempts.
///
/// Cloning is cheap; clones share the same pipeline.
#[derive(Debug, Clone)]
pub struct LoginService {
    pipeline: Arc<GatePipeline>,
    default_route: Route,
}

impl LoginService {
    /// Wraps a frozen pipeline.
    #[must_use]
    pub fn new(pipeline: GatePipeline) -> Self {
        Self::from_shared(Arc::new(pipeline))
    }

    /// Wraps a pipeline that is already shared elsewhere.
    #[must_use]
    pub fn from_shared(pipeline: Arc<GatePipeline>) -> Self {
        Self {
            pipeline,
            default_route: Route::default(),
        }
    }

    /// Builds the canonical `user_exists → password_match → role_route`
    /// pipeline over `store`.
    #[must_use]
    pub fn standard(store: Arc<dyn CredentialStore>, router: RoleRouteGate) -> Self {
        // Canonical order satisfies every declared prerequisite
        let pipeline = GatePipeline::builder()
            .append(UserExistsGate::new(store.clone()))
            .append(PasswordMatchGate::new(store))
            .append(router)
            .freeze_unchecked();
        Self::new(pipeline)
    }

    /// Builds the canonical pipeline from configuration.
    ///
    /// Credentials back an [`InMemoryCredentialStore`]; routing supplies the
    /// privileged identities and the default route.
    #[must_use]
    pub fn from_config(config: &GatehouseConfig) -> Self {
        let store: InMemoryCredentialStore = config.credentials.store();
        let router = RoleRouteGate::new(config.routing.privileged.iter().cloned());
        Self::standard(Arc::new(store), router).with_default_route(config.routing.default_route)
    }

    /// Sets the route granted when every gate continues.
    #[must_use]
    pub fn with_default_route(mut self, route: Route) -> Self {
        self.default_route = route;
        self
    }

    /// Returns the route granted on implicit accept.
    pub fn default_route(&self) -> Route {
        self.default_route
    }

    /// Returns the underlying pipeline.
    pub fn pipeline(&self) -> &GatePipeline {
        &self.pipeline
    }

    /// Evaluates a login attempt.
    ///
    /// # Errors
    ///
    /// Returns [`GatehouseError::Store`](gatehouse_core::GatehouseError::Store)
    /// if a credential store fails. Failures are never reported as `Denied`.
    #[instrument(skip_all, fields(identity = %identity))]
    pub async fn login(&self, identity: &str, secret: &str) -> GatehouseResult<LoginOutcome> {
        let attempt = LoginAttempt::new(identity, secret);
        let started = Instant::now();

        let evaluation = match self.pipeline.evaluate_traced(&attempt).await {
            Ok(evaluation) => evaluation,
            Err(err) => {
                warn!(error = %err, retryable = err.is_retryable(), "Login evaluation failed");
                return Err(err);
            }
        };

        let outcome = LoginOutcome::from_decision(evaluation.decision, self.default_route);
        let elapsed = started.elapsed();

        self.record_gate_decisions(&evaluation);
        record_login(outcome.label(), outcome.reason().map(RejectReason::code), elapsed);

        info!(
            outcome = outcome.label(),
            route = outcome.route().map(Route::name),
            reason = outcome.reason().map(RejectReason::code),
            decided_by = evaluation.decided_by,
            gates_run = evaluation.gates_run,
            duration_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            "Login evaluated"
        );

        Ok(outcome)
    }

    // Every gate before the deciding one returned Continue.
    fn record_gate_decisions(&self, evaluation: &Evaluation) {
        let names = self.pipeline.gate_names();
        let ran = &names[..evaluation.gates_run];
        let continued = if evaluation.decided_by.is_some() {
            ran.len().saturating_sub(1)
        } else {
            ran.len()
        };

        for &name in &ran[..continued] {
            record_gate_decision(name, "continue");
        }
        if let Some(name) = evaluation.decided_by {
            record_gate_decision(name, evaluation.decision.label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::fixtures::FailingCredentialStore;
    use gatehouse_core::Decision;
    use gatehouse_pipeline::FnGate;

    fn demo() -> LoginService {
        LoginService::standard(
            Arc::new(InMemoryCredentialStore::demo()),
            RoleRouteGate::default(),
        )
    }

    #[test]
    fn test_standard_order_passes_validation() {
        let store: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::demo());
        let checked = GatePipeline::builder()
            .append(UserExistsGate::new(store.clone()))
            .append(PasswordMatchGate::new(store))
            .append(RoleRouteGate::default())
            .freeze();
        assert!(checked.is_ok());
        assert_eq!(
            demo().pipeline().gate_names(),
            vec!["user_exists", "password_match", "role_route"]
        );
    }

    #[tokio::test]
    async fn test_login_maps_decisions() {
        let service = demo();
        assert_eq!(
            service.login("admin", "admin").await.unwrap(),
            LoginOutcome::Granted { route: Route::Admin }
        );
        assert_eq!(
            service.login("ghost", "x").await.unwrap(),
            LoginOutcome::Denied {
                reason: RejectReason::UnknownUser
            }
        );
    }

    #[tokio::test]
    async fn test_implicit_accept_uses_default_route() {
        let pipeline = GatePipeline::builder()
            .append(FnGate::new("allow", |_| Decision::Continue))
            .freeze()
            .unwrap();

        let service = LoginService::new(pipeline);
        assert_eq!(service.default_route(), Route::Standard);
        assert_eq!(
            service.login("anyone", "").await.unwrap(),
            LoginOutcome::Granted {
                route: Route::Standard
            }
        );

        let service = service.with_default_route(Route::Admin);
        assert_eq!(
            service.login("anyone", "").await.unwrap(),
            LoginOutcome::Granted { route: Route::Admin }
        );
    }

    #[tokio::test]
    async fn test_empty_pipeline_grants_default_route() {
        let service = LoginService::new(GatePipeline::builder().freeze().unwrap());
        assert!(service.login("x", "y").await.unwrap().is_granted());
    }

    #[tokio::test]
    async fn test_store_failure_is_error() {
        let service = LoginService::standard(
            Arc::new(FailingCredentialStore::default()),
            RoleRouteGate::default(),
        );
        let err = service.login("admin", "admin").await.unwrap_err();
        assert!(err.is_store_failure());
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = GatehouseConfig::builder()
            .user("root", "toor")
            .user("guest", "guest")
            .routing(gatehouse_config::RoutingSection {
                privileged: vec!["root".to_string()],
                default_route: Route::Admin,
            })
            .build();

        let service = LoginService::from_config(&config);
        assert_eq!(service.default_route(), Route::Admin);
        assert_eq!(
            service.login("root", "toor").await.unwrap(),
            LoginOutcome::Granted { route: Route::Admin }
        );
        assert_eq!(
            service.login("guest", "guest").await.unwrap(),
            LoginOutcome::Granted {
                route: Route::Standard
            }
        );
        assert_eq!(
            service.login("admin", "admin").await.unwrap(),
            LoginOutcome::Denied {
                reason: RejectReason::UnknownUser
            }
        );
    }

    #[tokio::test]
    async fn test_clones_share_pipeline() {
        let service = demo();
        let clone = service.clone();
        assert!(std::ptr::eq(service.pipeline(), clone.pipeline()));
    }
}
