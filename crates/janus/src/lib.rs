//! # Janus
//!
//! **Principal resolution middleware for request pipelines**
//!
//! Janus is the step of a request pipeline that turns an authenticated
//! identity — or a well-defined absence of one — into a strongly-typed
//! principal value handed to the handler, independent of whether
//! authentication was mandatory for the matched route:
//!
//! - 🗝️ **Always a value** – handlers receive a non-null principal in every
//!   defined variant; open routes get the sentinel form, never a hole
//! - 🧩 **Typed variants** – the handler's declared parameter type selects
//!   the variant; a registry maps type tags to construction rules
//! - 🚪 **Policy gate** – guarded routes consult an external
//!   [`Authenticator`](resolve::Authenticator) before any principal is built
//! - 🔁 **One-shot contexts** – per-request `INIT → RESOLVED → BOUND`
//!   lifecycle with double-resolution detection
//!
//! ## Quick Start
//!
//! ```rust
//! use janus::prelude::*;
//!
//! let resolver = PrincipalResolver::new();
//! let binder = HandlerBinder::new();
//!
//! // The dispatch layer builds one snapshot and one context per request.
//! let request = RequestSnapshot::builder()
//!     .uri("/no-auth-test/null-principal-entity")
//!     .build();
//! let mut ctx = IdentityContext::new(PrincipalVariant::Null);
//!
//! resolver.resolve(&request, SecurityPolicy::Open, &mut ctx)?;
//! let principal = binder.bind(&mut ctx, &BindingSite::new(PrincipalVariant::Null))?;
//!
//! // The handler runs with a principal either way.
//! assert_eq!(principal.name(), "null");
//! # Ok::<(), janus::core::PrincipalError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/janus/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use janus_core as core;

// Re-export the resolution pipeline
pub use janus_resolve as resolve;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use janus_core::{
        IdentityContext, JsonPrincipal, NullPrincipal, Principal, PrincipalError, PrincipalResult,
        PrincipalVariant, RequestId, SecurityPolicy,
    };
    pub use janus_resolve::{
        Authenticator, BindingSite, HandlerBinder, PrincipalParam, PrincipalResolver,
        RequestSnapshot, VariantRegistry,
    };
}
