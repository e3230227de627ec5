//! Variant registry and construction rules.
//!
//! Each principal variant is backed by a [`ConstructionRule`] that builds
//! the variant's value from a request, falling back to the variant's
//! sentinel form when the request supplies nothing usable. The
//! [`VariantRegistry`] maps type tags to rules; variant selection is a
//! lookup, not reflection.

use crate::authenticator::Subject;
use crate::request::RequestSnapshot;
use janus_core::{JsonPrincipal, NullPrincipal, Principal, PrincipalVariant};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds one principal variant from a request.
///
/// Construction never fails: a rule that cannot use the request's data
/// produces its sentinel form instead. Whether authentication had to happen
/// first is decided before any rule runs.
pub trait ConstructionRule: Send + Sync {
    /// The variant this rule constructs.
    fn variant(&self) -> PrincipalVariant;

    /// The variant's sentinel form.
    fn sentinel(&self) -> Principal;

    /// Constructs the principal from the request. `subject` is the
    /// authenticated subject when the route's policy required one.
    fn construct(&self, request: &RequestSnapshot, subject: Option<&Subject>) -> Principal;
}

/// Rule for the sentinel variant: always "authenticated as nobody".
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPrincipalRule;

impl ConstructionRule for NullPrincipalRule {
    fn variant(&self) -> PrincipalVariant {
        PrincipalVariant::Null
    }

    fn sentinel(&self) -> Principal {
        NullPrincipal.into()
    }

    fn construct(&self, _request: &RequestSnapshot, _subject: Option<&Subject>) -> Principal {
        NullPrincipal.into()
    }
}

#[derive(Deserialize)]
struct NamePayload {
    name: String,
}

/// Rule for the JSON variant: decodes `{"name": ...}` from the body.
///
/// Preference order: a non-empty decoded name, then the authenticated
/// subject's name, then the sentinel. An undecodable body or an empty name
/// counts as "supplies no data" and is not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPrincipalRule;

impl JsonPrincipalRule {
    fn decode(request: &RequestSnapshot) -> Option<JsonPrincipal> {
        if request.is_body_empty() {
            return None;
        }
        match serde_json::from_slice::<NamePayload>(request.body()) {
            Ok(payload) => JsonPrincipal::new(payload.name),
            Err(err) => {
                debug!(path = request.path(), error = %err, "payload not decodable, using sentinel");
                None
            }
        }
    }
}

impl ConstructionRule for JsonPrincipalRule {
    fn variant(&self) -> PrincipalVariant {
        PrincipalVariant::Json
    }

    fn sentinel(&self) -> Principal {
        JsonPrincipal::sentinel().into()
    }

    fn construct(&self, request: &RequestSnapshot, subject: Option<&Subject>) -> Principal {
        Self::decode(request)
            .or_else(|| subject.and_then(|s| JsonPrincipal::new(s.name())))
            .unwrap_or_else(JsonPrincipal::sentinel)
            .into()
    }
}

/// Registry mapping variant tags to construction rules.
///
/// Rules are registered once at startup and shared across requests; the
/// registry itself is immutable afterwards and `Send + Sync`.
///
/// # Example
///
/// ```
/// use janus_core::PrincipalVariant;
/// use janus_resolve::VariantRegistry;
///
/// let registry = VariantRegistry::with_defaults();
/// assert!(registry.contains(PrincipalVariant::Json));
/// assert!(registry.contains(PrincipalVariant::Null));
/// ```
#[derive(Default)]
pub struct VariantRegistry {
    rules: HashMap<PrincipalVariant, Arc<dyn ConstructionRule>>,
}

impl VariantRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in rules for every variant.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonPrincipalRule));
        registry.register(Arc::new(NullPrincipalRule));
        registry
    }

    /// Registers a rule under the variant it constructs, replacing any
    /// previous rule for that variant.
    pub fn register(&mut self, rule: Arc<dyn ConstructionRule>) {
        self.rules.insert(rule.variant(), rule);
    }

    /// Returns the rule for `variant`, if one is registered.
    #[must_use]
    pub fn rule(&self, variant: PrincipalVariant) -> Option<&Arc<dyn ConstructionRule>> {
        self.rules.get(&variant)
    }

    /// Checks if a rule is registered for `variant`.
    #[must_use]
    pub fn contains(&self, variant: PrincipalVariant) -> bool {
        self.rules.contains_key(&variant)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut variants: Vec<_> = self.rules.keys().copied().collect();
        variants.sort_by_key(PrincipalVariant::as_str);
        f.debug_struct("VariantRegistry")
            .field("variants", &variants)
            .finish()
    }
}
