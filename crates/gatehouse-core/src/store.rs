//! Credential store collaborator.
//!
//! Gates never own credentials. They query a [`CredentialStore`] handed to
//! them at construction time, typically an `Arc<dyn CredentialStore>` shared
//! by every gate of a pipeline.
//!
//! The store interface is asynchronous so that a remote store can be plugged
//! in without changing how the pipeline sequences gates.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::error::StoreResult;

/// A boxed future, as returned by stores and gates.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Username → secret lookup consulted by gates.
///
/// # Contract
///
/// - `verify_password` is only called for an identity that `user_exists`
///   confirmed earlier in the same pipeline run. Implementations must still
///   answer `Ok(false)` (never panic) for unknown identities.
/// - Answers must be free of side effects.
/// - Failures to reach the backing store are reported as
///   [`StoreError`](crate::StoreError), never as `Ok(false)`.
pub trait CredentialStore: Send + Sync + 'static {
    /// Returns true iff `identity` is a known principal.
    fn user_exists<'a>(&'a self, identity: &'a str) -> BoxFuture<'a, StoreResult<bool>>;

    /// Returns true iff `secret` matches the stored secret for `identity`.
    fn verify_password<'a>(
        &'a self,
        identity: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, StoreResult<bool>>;
}

/// In-memory credential store.
///
/// Secrets are compared with plain equality; there is no hashing.
///
/// # Example
///
/// ```
/// use gatehouse_core::{CredentialStore, InMemoryCredentialStore};
///
/// # tokio_test::block_on(async {
/// let store = InMemoryCredentialStore::new()
///     .with_user("admin", "admin")
///     .with_user("user", "user");
///
/// assert!(store.user_exists("admin").await.unwrap());
/// assert!(!store.verify_password("admin", "12345").await.unwrap());
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    users: HashMap<String, String>,
}

impl InMemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the demo store with `admin`/`admin` and `user`/`user`.
    #[must_use]
    pub fn demo() -> Self {
        Self::new().with_user("admin", "admin").with_user("user", "user")
    }

    /// Adds (or replaces) a user.
    #[must_use]
    pub fn with_user(mut self, identity: impl Into<String>, secret: impl Into<String>) -> Self {
        self.users.insert(identity.into(), secret.into());
        self
    }

    /// Returns the number of known principals.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if the store has no principals.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn lookup(&self, identity: &str) -> Option<&str> {
        self.users.get(identity).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for InMemoryCredentialStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            users: iter
                .into_iter()
                .map(|(identity, secret)| (identity.into(), secret.into()))
                .collect(),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn user_exists<'a>(&'a self, identity: &'a str) -> BoxFuture<'a, StoreResult<bool>> {
        Box::pin(async move { Ok(self.lookup(identity).is_some()) })
    }

    fn verify_password<'a>(
        &'a self,
        identity: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, StoreResult<bool>> {
        Box::pin(async move { Ok(self.lookup(identity) == Some(secret)) })
    }
}
