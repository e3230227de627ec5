//! # Janus Resolve
//!
//! Principal resolution and handler binding for the Janus middleware.
//!
//! This crate implements the per-request pipeline between routing and
//! handler execution:
//!
//! ```text
//! RequestSnapshot ──▶ PrincipalResolver ──▶ IdentityContext ──▶ HandlerBinder ──▶ handler
//!                        │
//!                        ├─ SecurityPolicy gate (Authenticator on guarded routes)
//!                        └─ VariantRegistry (tag → construction rule)
//! ```
//!
//! Handlers always receive a principal value: routes without an
//! authentication requirement get the declared variant's sentinel form
//! (or the value decoded from the request, for variants that carry data).
//!
//! ## Example
//!
//! ```rust
//! use janus_core::{IdentityContext, PrincipalVariant, SecurityPolicy};
//! use janus_resolve::{BindingSite, HandlerBinder, PrincipalResolver, RequestSnapshot};
//!
//! let resolver = PrincipalResolver::new();
//! let binder = HandlerBinder::new();
//!
//! let request = RequestSnapshot::builder()
//!     .uri("/no-auth-test/json-principal-entity")
//!     .header("content-type", "application/json")
//!     .body(r#"{"name": "alice"}"#)
//!     .build();
//!
//! let mut ctx = IdentityContext::new(PrincipalVariant::Json);
//! resolver.resolve(&request, SecurityPolicy::Open, &mut ctx).unwrap();
//!
//! let site = BindingSite::new(PrincipalVariant::Json);
//! let principal = binder.bind(&mut ctx, &site).unwrap();
//! assert_eq!(principal.name(), "alice");
//! ```

#![doc(html_root_url = "https://docs.rs/janus-resolve/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod authenticator;
mod binder;
mod credentials;
mod registry;
mod request;
mod resolver;

pub use authenticator::{Authenticator, AuthenticatorError, StaticAuthenticator, Subject};
pub use binder::{BindingSite, HandlerBinder, PrincipalParam};
pub use credentials::Credentials;
pub use registry::{ConstructionRule, JsonPrincipalRule, NullPrincipalRule, VariantRegistry};
pub use request::{RequestSnapshot, RequestSnapshotBuilder};
pub use resolver::PrincipalResolver;
