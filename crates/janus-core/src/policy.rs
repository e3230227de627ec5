//! Per-route security policy.
//!
//! The dispatch layer determines the policy for the matched route and hands
//! it to the resolver. Resolution runs either way; the policy only decides
//! whether the external authenticator must accept the request first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a route mandates authentication.
///
/// Serde-deserializable so route configuration files can carry it. The
/// default is [`SecurityPolicy::Required`]; open routes opt in explicitly.
///
/// # Example
///
/// ```
/// use janus_core::SecurityPolicy;
///
/// let policy: SecurityPolicy = serde_json::from_str("\"open\"").unwrap();
/// assert!(!policy.requires_authentication());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityPolicy {
    /// No authentication requirement; resolution produces the variant's
    /// sentinel form unless the request supplies data.
    Open,
    /// Credentials must be presented and accepted by the authenticator.
    #[default]
    Required,
}

impl SecurityPolicy {
    /// Returns `true` when the route mandates authentication.
    #[must_use]
    pub const fn requires_authentication(&self) -> bool {
        matches!(self, Self::Required)
    }
}

impl fmt::Display for SecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Required => f.write_str("required"),
        }
    }
}
