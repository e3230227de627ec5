//! Per-request identity context.
//!
//! The [`IdentityContext`] is created by the dispatch layer when a request
//! arrives, mutated exactly once by the resolver, and dropped at request
//! end. It is exclusively owned by its request; no locking is involved.

use crate::error::{PrincipalError, PrincipalResult};
use crate::principal::{Principal, PrincipalVariant};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for each request, using UUID v7.
///
/// UUID v7 is time-ordered, which makes it ideal for request tracking
/// and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `RequestId` from an existing UUID, e.g. one parsed from a
    /// propagation header.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a principal within one request.
///
/// Transitions are strictly `Init -> Resolved -> Bound`; no transition
/// skips a state and `Bound` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Context created, resolution has not run.
    Init,
    /// The resolver stored a principal.
    Resolved,
    /// The binder handed the principal to the handler.
    Bound,
}

/// Per-request holder of zero-or-one resolved principal.
///
/// Holds the variant the matched handler declared, the principal once the
/// resolver produced it, and the binding state machine. [`IdentityContext::set`]
/// accepts at most one principal per request.
///
/// # Example
///
/// ```
/// use janus_core::{IdentityContext, NullPrincipal, PrincipalVariant};
///
/// let mut ctx = IdentityContext::new(PrincipalVariant::Null);
/// assert!(ctx.principal().is_none());
///
/// ctx.set(NullPrincipal.into()).unwrap();
/// assert_eq!(ctx.principal().unwrap().name(), "null");
/// ```
#[derive(Debug, Clone)]
pub struct IdentityContext {
    request_id: RequestId,
    variant_requested: PrincipalVariant,
    resolved: Option<Principal>,
    state: BindingState,
}

impl IdentityContext {
    /// Creates a context for a request whose handler declares `variant`.
    #[must_use]
    pub fn new(variant_requested: PrincipalVariant) -> Self {
        Self::with_request_id(RequestId::new(), variant_requested)
    }

    /// Creates a context with an externally supplied request ID.
    #[must_use]
    pub const fn with_request_id(
        request_id: RequestId,
        variant_requested: PrincipalVariant,
    ) -> Self {
        Self {
            request_id,
            variant_requested,
            resolved: None,
            state: BindingState::Init,
        }
    }

    /// Returns the request ID.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the variant the matched handler declared.
    #[must_use]
    pub const fn variant_requested(&self) -> PrincipalVariant {
        self.variant_requested
    }

    /// Returns the current binding state.
    #[must_use]
    pub const fn state(&self) -> BindingState {
        self.state
    }

    /// Returns the resolved principal, or `None` before resolution ran.
    #[must_use]
    pub const fn principal(&self) -> Option<&Principal> {
        self.resolved.as_ref()
    }

    /// Stores the resolved principal.
    ///
    /// May be called at most once per request.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalError::DoubleResolution`] on a second call; the
    /// previously stored value is left untouched.
    pub fn set(&mut self, principal: Principal) -> PrincipalResult<()> {
        match self.state {
            BindingState::Init => {
                self.resolved = Some(principal);
                self.state = BindingState::Resolved;
                Ok(())
            }
            BindingState::Resolved | BindingState::Bound => {
                Err(PrincipalError::DoubleResolution {
                    request_id: self.request_id,
                })
            }
        }
    }

    /// Advances the state machine to `Bound`.
    ///
    /// Called by the binder once the principal has been handed to the
    /// handler. `Bound` is terminal, so repeating the call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalError::UnresolvedPrincipal`] when no principal
    /// has been stored yet.
    pub fn mark_bound(&mut self) -> PrincipalResult<()> {
        match self.state {
            BindingState::Init => Err(PrincipalError::UnresolvedPrincipal),
            BindingState::Resolved | BindingState::Bound => {
                self.state = BindingState::Bound;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::{JsonPrincipal, NullPrincipal};

    #[test]
    fn test_request_id_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::new();
        assert_eq!(id.to_string().len(), 36);
    }

    #[test]
    fn test_request_id_from_uuid() {
        let uuid = Uuid::now_v7();
        assert_eq!(*RequestId::from_uuid(uuid).as_uuid(), uuid);
    }

    #[test]
    fn test_new_context_is_unresolved() {
        let ctx = IdentityContext::new(PrincipalVariant::Json);
        assert_eq!(ctx.state(), BindingState::Init);
        assert_eq!(ctx.variant_requested(), PrincipalVariant::Json);
        assert!(ctx.principal().is_none());
    }

    #[test]
    fn test_set_stores_principal() {
        let mut ctx = IdentityContext::new(PrincipalVariant::Json);
        ctx.set(JsonPrincipal::new("alice").unwrap().into()).unwrap();

        assert_eq!(ctx.state(), BindingState::Resolved);
        assert_eq!(ctx.principal().unwrap().name(), "alice");
    }

    #[test]
    fn test_set_twice_fails_and_preserves_first_value() {
        let mut ctx = IdentityContext::new(PrincipalVariant::Json);
        ctx.set(JsonPrincipal::new("alice").unwrap().into()).unwrap();

        let err = ctx.set(NullPrincipal.into()).unwrap_err();
        assert!(matches!(err, PrincipalError::DoubleResolution { .. }));
        assert_eq!(ctx.principal().unwrap().name(), "alice");
    }

    #[test]
    fn test_set_after_bound_fails() {
        let mut ctx = IdentityContext::new(PrincipalVariant::Null);
        ctx.set(NullPrincipal.into()).unwrap();
        ctx.mark_bound().unwrap();

        let err = ctx.set(NullPrincipal.into()).unwrap_err();
        assert!(matches!(err, PrincipalError::DoubleResolution { .. }));
    }

    #[test]
    fn test_mark_bound_before_resolution_fails() {
        let mut ctx = IdentityContext::new(PrincipalVariant::Null);
        let err = ctx.mark_bound().unwrap_err();
        assert!(matches!(err, PrincipalError::UnresolvedPrincipal));
        assert_eq!(ctx.state(), BindingState::Init);
    }

    #[test]
    fn test_bound_is_terminal() {
        let mut ctx = IdentityContext::new(PrincipalVariant::Null);
        ctx.set(NullPrincipal.into()).unwrap();
        ctx.mark_bound().unwrap();
        ctx.mark_bound().unwrap();
        assert_eq!(ctx.state(), BindingState::Bound);
    }
}
