//! Login attempt value type.

use std::fmt;

/// A single login attempt: the identity being claimed and its secret.
///
/// Attempts are created once per `login` call and never mutated. Gates only
/// ever receive a shared reference.
///
/// The [`Debug`] implementation never prints the secret, so attempts can be
/// logged safely.
///
/// # Example
///
/// ```
/// use gatehouse_core::LoginAttempt;
///
/// let attempt = LoginAttempt::new("admin", "hunter2");
/// assert_eq!(attempt.identity(), "admin");
/// assert!(!format!("{attempt:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    identity: String,
    secret: String,
}

impl LoginAttempt {
    /// Creates a new login attempt.
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }

    /// Returns the claimed identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the secret supplied with the attempt.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for LoginAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginAttempt")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let attempt = LoginAttempt::new("user", "user");
        assert_eq!(attempt.identity(), "user");
        assert_eq!(attempt.secret(), "user");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let attempt = LoginAttempt::new("admin", "s3cr3t-value");
        let debug = format!("{:?}", attempt);
        assert!(debug.contains("admin"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("s3cr3t-value"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(LoginAttempt::new("a", "b"), LoginAttempt::new("a", "b"));
        assert_ne!(LoginAttempt::new("a", "b"), LoginAttempt::new("a", "c"));
    }
}
