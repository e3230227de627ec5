//! The principal resolution step.
//!
//! [`PrincipalResolver::resolve`] runs zero or one times per request,
//! between context creation and handler binding. It owns the variant
//! lookup, the policy gate, and the exactly-once write into the
//! [`IdentityContext`].

use crate::authenticator::{Authenticator, Subject};
use crate::credentials::Credentials;
use crate::registry::VariantRegistry;
use crate::request::RequestSnapshot;
use janus_core::{IdentityContext, Principal, PrincipalError, PrincipalResult, SecurityPolicy};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a request into a typed principal.
///
/// Stateless and reentrant: one resolver serves all requests, usually
/// behind an `Arc`. The variant to construct comes from the request's
/// [`IdentityContext`], which records the matched handler's declared
/// parameter type. Binding-site markers are invisible here; nothing about
/// a handler parameter except its type participates in resolution.
///
/// # Example
///
/// ```
/// use janus_core::{IdentityContext, PrincipalVariant, SecurityPolicy};
/// use janus_resolve::{PrincipalResolver, RequestSnapshot};
///
/// let resolver = PrincipalResolver::new();
/// let request = RequestSnapshot::builder()
///     .uri("/no-auth-test/null-principal-entity")
///     .build();
///
/// let mut ctx = IdentityContext::new(PrincipalVariant::Null);
/// let principal = resolver
///     .resolve(&request, SecurityPolicy::Open, &mut ctx)
///     .unwrap();
/// assert_eq!(principal.name(), "null");
/// ```
pub struct PrincipalResolver {
    registry: VariantRegistry,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl PrincipalResolver {
    /// Creates a resolver with the built-in variant rules and no
    /// authenticator. Suitable for pipelines where every route is open.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(VariantRegistry::with_defaults())
    }

    /// Creates a resolver over a custom registry.
    #[must_use]
    pub fn with_registry(registry: VariantRegistry) -> Self {
        Self {
            registry,
            authenticator: None,
        }
    }

    /// Attaches the authenticator consulted on guarded routes.
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Returns the registry backing this resolver.
    #[must_use]
    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Resolves the request into a principal of the context's requested
    /// variant and stores it in the context.
    ///
    /// On an open route this always succeeds for a registered variant: the
    /// rule constructs either from request data or the variant's sentinel
    /// form. On a guarded route the authenticator must accept the request
    /// first.
    ///
    /// # Errors
    ///
    /// - [`PrincipalError::UnsupportedVariant`] when the requested variant
    ///   has no registered rule.
    /// - [`PrincipalError::AuthenticationRequired`] when `policy` mandates
    ///   authentication and credentials are missing, rejected, or the
    ///   authenticator failed.
    /// - [`PrincipalError::DoubleResolution`] when the context was already
    ///   resolved.
    pub fn resolve(
        &self,
        request: &RequestSnapshot,
        policy: SecurityPolicy,
        ctx: &mut IdentityContext,
    ) -> PrincipalResult<Principal> {
        let variant = ctx.variant_requested();
        let rule = self
            .registry
            .rule(variant)
            .ok_or(PrincipalError::UnsupportedVariant { variant })?;

        let subject = if policy.requires_authentication() {
            Some(self.authenticate(request)?)
        } else {
            None
        };

        let principal = rule.construct(request, subject.as_ref());
        debug!(
            request_id = %ctx.request_id(),
            variant = %variant,
            principal = %principal.log_id(),
            "principal resolved"
        );

        ctx.set(principal.clone())?;
        Ok(principal)
    }

    fn authenticate(&self, request: &RequestSnapshot) -> PrincipalResult<Subject> {
        let Some(authenticator) = self.authenticator.as_deref() else {
            return Err(PrincipalError::authentication_required(
                "no authenticator configured for guarded route",
            ));
        };

        let Some(credentials) = Credentials::from_request(request) else {
            warn!(path = request.path(), "guarded route called without credentials");
            return Err(PrincipalError::authentication_required(
                "missing credentials",
            ));
        };

        match authenticator.authenticate(&credentials) {
            Ok(Some(subject)) => Ok(subject),
            Ok(None) => {
                warn!(
                    path = request.path(),
                    scheme = credentials.scheme(),
                    "credentials rejected"
                );
                Err(PrincipalError::authentication_required(
                    "invalid credentials",
                ))
            }
            Err(err) => Err(PrincipalError::authentication_required_with_source(
                "authenticator failure",
                err,
            )),
        }
    }
}

impl Default for PrincipalResolver {
    fn default() -> Self {
        Self::new()
    }
}
