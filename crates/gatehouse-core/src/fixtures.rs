//! Test fixtures for Gatehouse development and testing.
//!
//! This module provides credential stores that make pipeline behaviour
//! observable in tests:
//!
//! - [`CountingCredentialStore`] wraps a store and counts every query
//! - [`FailingCredentialStore`] fails every query, simulating an outage
//!
//! # Example
//!
//! ```
//! use gatehouse_core::fixtures::CountingCredentialStore;
//! use gatehouse_core::{CredentialStore, InMemoryCredentialStore};
//!
//! # tokio_test::block_on(async {
//! let store = CountingCredentialStore::new(InMemoryCredentialStore::demo());
//! store.user_exists("admin").await.unwrap();
//!
//! assert_eq!(store.user_exists_calls(), 1);
//! assert_eq!(store.verify_password_calls(), 0);
//! # });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{StoreError, StoreResult};
use crate::store::{BoxFuture, CredentialStore, InMemoryCredentialStore};

/// Store wrapper that counts calls per method.
#[derive(Debug)]
pub struct CountingCredentialStore<S = InMemoryCredentialStore> {
    inner: S,
    user_exists_calls: AtomicUsize,
    verify_password_calls: AtomicUsize,
}

impl<S: CredentialStore> CountingCredentialStore<S> {
    /// Wraps `inner`, starting both counters at zero.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            user_exists_calls: AtomicUsize::new(0),
            verify_password_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `user_exists` calls so far.
    pub fn user_exists_calls(&self) -> usize {
        self.user_exists_calls.load(Ordering::SeqCst)
    }

    /// Number of `verify_password` calls so far.
    pub fn verify_password_calls(&self) -> usize {
        self.verify_password_calls.load(Ordering::SeqCst)
    }

    /// Total number of queries of either kind.
    pub fn total_calls(&self) -> usize {
        self.user_exists_calls() + self.verify_password_calls()
    }
}

impl<S: CredentialStore> CredentialStore for CountingCredentialStore<S> {
    fn user_exists<'a>(&'a self, identity: &'a str) -> BoxFuture<'a, StoreResult<bool>> {
        self.user_exists_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.user_exists(identity)
    }

    fn verify_password<'a>(
        &'a self,
        identity: &'a str,
        secret: &'a str,
    ) -> BoxFuture<'a, StoreResult<bool>> {
        self.verify_password_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.verify_password(identity, secret)
    }
}

/// Store that fails every query with [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct FailingCredentialStore {
    message: String,
}

impl FailingCredentialStore {
    /// Creates a store failing with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingCredentialStore {
    fn default() -> Self {
        Self::new("credential store offline")
    }
}

impl CredentialStore for FailingCredentialStore {
    fn user_exists<'a>(&'a self, _identity: &'a str) -> BoxFuture<'a, StoreResult<bool>> {
        Box::pin(async move { Err(StoreError::unavailable(self.message.clone())) })
    }

    fn verify_password<'a>(
        &'a self,
        _identity: &'a str,
        _secret: &'a str,
    ) -> BoxFuture<'a, StoreResult<bool>> {
        Box::pin(async move { Err(StoreError::unavailable(self.message.clone())) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counting_store_counts_each_method() {
        let store = CountingCredentialStore::new(InMemoryCredentialStore::demo());
        assert!(store.user_exists("user").await.unwrap());
        assert!(store.verify_password("user", "user").await.unwrap());
        assert!(!store.verify_password("user", "nope").await.unwrap());

        assert_eq!(store.user_exists_calls(), 1);
        assert_eq!(store.verify_password_calls(), 2);
        assert_eq!(store.total_calls(), 3);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = FailingCredentialStore::default();
        let err = store.user_exists("admin").await.unwrap_err();
        assert!(err.to_string().contains("offline"));
        assert!(store.verify_password("admin", "admin").await.is_err());
    }
}
