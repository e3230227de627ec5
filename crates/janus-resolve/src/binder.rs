//! Handler parameter binding.
//!
//! The [`HandlerBinder`] is the last step before handler execution: it
//! takes the principal out of the request's [`IdentityContext`] and checks
//! it against the parameter the handler declared. Marker tags on the
//! binding site are carried for framework metadata parity only; neither
//! resolution nor binding reads them.

use janus_core::{
    IdentityContext, JsonPrincipal, NullPrincipal, Principal, PrincipalError, PrincipalResult,
    PrincipalVariant,
};

/// Description of a handler parameter receiving a principal.
///
/// A site is its declared variant plus any marker tags the framework
/// attached to the parameter. Tags have no behavior here; they exist so
/// callers can carry their metadata through and so tests can assert that
/// binding outcomes are independent of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSite {
    variant: PrincipalVariant,
    markers: Vec<String>,
}

impl BindingSite {
    /// Creates a binding site for a parameter of the given variant.
    #[must_use]
    pub const fn new(variant: PrincipalVariant) -> Self {
        Self {
            variant,
            markers: Vec::new(),
        }
    }

    /// Attaches a marker tag.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Returns the declared variant.
    #[must_use]
    pub const fn variant(&self) -> PrincipalVariant {
        self.variant
    }

    /// Returns the marker tags attached to this site.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

/// A principal variant usable as a typed handler parameter.
///
/// Implemented by the concrete variant types so [`HandlerBinder::bind_typed`]
/// can hand handlers the exact type they declared instead of the
/// [`Principal`] union.
pub trait PrincipalParam: Sized {
    /// The variant tag this parameter type corresponds to.
    const VARIANT: PrincipalVariant;

    /// Downcasts the union value into this parameter type.
    fn from_principal(principal: Principal) -> Option<Self>;
}

impl PrincipalParam for JsonPrincipal {
    const VARIANT: PrincipalVariant = PrincipalVariant::Json;

    fn from_principal(principal: Principal) -> Option<Self> {
        match principal {
            Principal::Json(p) => Some(p),
            Principal::Null(_) => None,
        }
    }
}

impl PrincipalParam for NullPrincipal {
    const VARIANT: PrincipalVariant = PrincipalVariant::Null;

    fn from_principal(principal: Principal) -> Option<Self> {
        match principal {
            Principal::Null(p) => Some(p),
            Principal::Json(_) => None,
        }
    }
}

/// Binds a resolved principal to a handler's declared parameter.
///
/// Stateless; one binder serves all requests.
///
/// # Example
///
/// ```
/// use janus_core::{IdentityContext, NullPrincipal, PrincipalVariant};
/// use janus_resolve::{BindingSite, HandlerBinder};
///
/// let mut ctx = IdentityContext::new(PrincipalVariant::Null);
/// ctx.set(NullPrincipal.into()).unwrap();
///
/// let binder = HandlerBinder::new();
/// let site = BindingSite::new(PrincipalVariant::Null);
/// let principal = binder.bind(&mut ctx, &site).unwrap();
/// assert_eq!(principal.name(), "null");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerBinder;

impl HandlerBinder {
    /// Creates a binder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the context's principal for the given binding site and
    /// advances the context to `Bound`.
    ///
    /// # Errors
    ///
    /// - [`PrincipalError::UnresolvedPrincipal`] when resolution has not
    ///   run for this context.
    /// - [`PrincipalError::BindingTypeMismatch`] when the resolved variant
    ///   differs from the site's declared variant; the context state is
    ///   left unchanged.
    pub fn bind(
        &self,
        ctx: &mut IdentityContext,
        site: &BindingSite,
    ) -> PrincipalResult<Principal> {
        let principal = ctx
            .principal()
            .ok_or(PrincipalError::UnresolvedPrincipal)?
            .clone();

        if principal.variant() != site.variant() {
            return Err(PrincipalError::BindingTypeMismatch {
                expected: site.variant(),
                found: principal.variant(),
            });
        }

        ctx.mark_bound()?;
        Ok(principal)
    }

    /// Binds and downcasts to the concrete parameter type the handler
    /// declared.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HandlerBinder::bind`], with the expected
    /// variant taken from `T`.
    pub fn bind_typed<T: PrincipalParam>(&self, ctx: &mut IdentityContext) -> PrincipalResult<T> {
        let site = BindingSite::new(T::VARIANT);
        let principal = self.bind(ctx, &site)?;
        let found = principal.variant();

        T::from_principal(principal).ok_or(PrincipalError::BindingTypeMismatch {
            expected: T::VARIANT,
            found,
        })
    }
}
