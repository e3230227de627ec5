//! The external authenticator seam.
//!
//! Actual credential validation is not this crate's business; the resolver
//! delegates it to an [`Authenticator`] collaborator behind this trait. The
//! verdict is three-valued: accepted (with a subject), rejected, or the
//! collaborator itself failed.

use crate::credentials::Credentials;
use std::collections::HashMap;
use thiserror::Error;

/// The subject a successful authentication names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    name: String,
}

impl Subject {
    /// Creates a subject.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the subject's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Failure of the authenticator collaborator itself.
///
/// Distinct from a rejection: rejected credentials are an expected outcome
/// (`Ok(None)`), while this error means the collaborator could not reach a
/// verdict at all (e.g. its token store was unreachable).
#[derive(Error, Debug)]
#[error("authenticator failure: {message}")]
pub struct AuthenticatorError {
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

impl AuthenticatorError {
    /// Creates an authenticator error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an authenticator error wrapping an underlying failure.
    pub fn with_source(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Validates presented credentials.
///
/// Implementations are stateless from this crate's point of view and must
/// be shareable across requests (`Send + Sync`).
///
/// # Contract
///
/// - `Ok(Some(subject))` — credentials accepted; `subject` names who they
///   belong to.
/// - `Ok(None)` — credentials well-formed but invalid. An expected outcome,
///   not an error.
/// - `Err(_)` — the collaborator failed to reach a verdict.
pub trait Authenticator: Send + Sync {
    /// Validates `credentials`, returning the authenticated subject.
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Subject>, AuthenticatorError>;
}

/// Table-backed authenticator for tests and demos.
///
/// Knows a fixed set of bearer tokens and Basic username/password pairs.
/// Anything else is rejected (never an error).
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    tokens: HashMap<String, String>,
    passwords: HashMap<String, String>,
}

impl StaticAuthenticator {
    /// Creates an authenticator that rejects everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `token` as belonging to `subject`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), subject.into());
        self
    }

    /// Accepts the Basic pair `username`/`password`; the subject is the
    /// username.
    #[must_use]
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.passwords.insert(username.into(), password.into());
        self
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Subject>, AuthenticatorError> {
        let subject = match credentials {
            Credentials::Bearer(token) => self.tokens.get(token).map(Subject::new),
            Credentials::Basic { username, password } => self
                .passwords
                .get(username)
                .filter(|expected| *expected == password)
                .map(|_| Subject::new(username)),
        };
        Ok(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_token() {
        let authenticator = StaticAuthenticator::new().with_token("token-1", "alice");
        let verdict = authenticator
            .authenticate(&Credentials::Bearer("token-1".to_string()))
            .unwrap();

        assert_eq!(verdict, Some(Subject::new("alice")));
    }

    #[test]
    fn test_rejects_unknown_token() {
        let authenticator = StaticAuthenticator::new().with_token("token-1", "alice");
        let verdict = authenticator
            .authenticate(&Credentials::Bearer("other".to_string()))
            .unwrap();

        assert!(verdict.is_none());
    }

    #[test]
    fn test_accepts_matching_basic_pair() {
        let authenticator = StaticAuthenticator::new().with_user("alice", "secret");
        let verdict = authenticator
            .authenticate(&Credentials::Basic {
                username: "alice".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();

        assert_eq!(verdict, Some(Subject::new("alice")));
    }

    #[test]
    fn test_rejects_wrong_password() {
        let authenticator = StaticAuthenticator::new().with_user("alice", "secret");
        let verdict = authenticator
            .authenticate(&Credentials::Basic {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            })
            .unwrap();

        assert!(verdict.is_none());
    }

    #[test]
    fn test_error_carries_source() {
        let err = AuthenticatorError::with_source(
            "token store unreachable",
            anyhow::anyhow!("connection refused"),
        );

        assert!(err.to_string().contains("token store unreachable"));
        let source = std::error::Error::source(&err).expect("source should be attached");
        assert!(source.to_string().contains("connection refused"));
    }
}
