//! Role routing gate.
//!
//! Chooses the landing route from the identity alone and ends evaluation.
//! It never rejects and never reads the credential store, so it belongs at
//! the end of a pipeline, after the gates that authenticate the attempt.

use crate::gate::{Gate, GateKind};
use gatehouse_core::{BoxFuture, Decision, GatehouseResult, LoginAttempt, Route};
use std::collections::HashSet;

/// Identity granted the admin route by [`RoleRouteGate::default`].
pub const DEFAULT_PRIVILEGED_IDENTITY: &str = "admin";

/// Gate that routes privileged identities to [`Route::Admin`] and everyone
/// else to [`Route::Standard`], always returning `Terminate`.
///
/// # Example
///
/// ```
/// use gatehouse_core::Route;
/// use gatehouse_pipeline::gates::RoleRouteGate;
///
/// let gate = RoleRouteGate::new(["root", "ops"]);
/// assert_eq!(gate.route_for("ops"), Route::Admin);
/// assert_eq!(gate.route_for("admin"), Route::Standard);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRouteGate {
    privileged: HashSet<String>,
}

impl RoleRouteGate {
    /// Creates a gate treating the given identities as privileged.
    pub fn new<I, S>(privileged: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            privileged: privileged.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the route for `identity`.
    pub fn route_for(&self, identity: &str) -> Route {
        if self.privileged.contains(identity) {
            Route::Admin
        } else {
            Route::Standard
        }
    }

    /// Returns true if `identity` is privileged.
    pub fn is_privileged(&self, identity: &str) -> bool {
        self.privileged.contains(identity)
    }
}

impl Default for RoleRouteGate {
    fn default() -> Self {
        Self::new([DEFAULT_PRIVILEGED_IDENTITY])
    }
}

impl Gate for RoleRouteGate {
    fn name(&self) -> &'static str {
        GateKind::RoleRoute.name()
    }

    fn terminates(&self) -> bool {
        GateKind::RoleRoute.terminates()
    }

    fn evaluate<'a>(&'a self, attempt: &'a LoginAttempt) -> BoxFuture<'a, GatehouseResult<Decision>> {
        Box::pin(async move { Ok(Decision::Terminate(self.route_for(attempt.identity()))) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_admin_routed_to_admin() {
        let gate = RoleRouteGate::default();
        let decision = gate
            .evaluate(&LoginAttempt::new("admin", "admin"))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Terminate(Route::Admin));
    }

    #[tokio::test]
    async fn test_everyone_else_routed_to_standard() {
        let gate = RoleRouteGate::default();
        for identity in ["user", "ghost", "Admin", ""] {
            let decision = gate
                .evaluate(&LoginAttempt::new(identity, "x"))
                .await
                .unwrap();
            assert_eq!(decision, Decision::Terminate(Route::Standard), "{identity}");
        }
    }

    #[tokio::test]
    async fn test_secret_is_ignored() {
        let gate = RoleRouteGate::default();
        let a = gate.evaluate(&LoginAttempt::new("admin", "")).await.unwrap();
        let b = gate
            .evaluate(&LoginAttempt::new("admin", "wrong"))
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_privileged_set() {
        let gate = RoleRouteGate::new(vec!["root".to_string()]);
        assert!(gate.is_privileged("root"));
        assert!(!gate.is_privileged("admin"));
        assert_eq!(gate.route_for("root"), Route::Admin);
    }

    #[test]
    fn test_empty_privileged_set_routes_everyone_to_standard() {
        let gate = RoleRouteGate::new(Vec::<String>::new());
        assert_eq!(gate.route_for("admin"), Route::Standard);
    }

    #[test]
    fn test_metadata() {
        let gate = RoleRouteGate::default();
        assert_eq!(gate.name(), "role_route");
        assert!(gate.terminates());
        assert!(gate.requires().is_empty());
    }
}
