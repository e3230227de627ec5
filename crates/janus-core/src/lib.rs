//! # Janus Core
//!
//! Core types for the Janus principal resolution middleware.
//!
//! This crate provides the foundational types used throughout Janus:
//!
//! - [`Principal`] - The closed set of principal variants a handler may declare
//! - [`PrincipalVariant`] - Type tag selecting one concrete variant
//! - [`IdentityContext`] - Per-request holder of the resolved principal
//! - [`PrincipalError`] - The contract's error kinds
//! - [`SecurityPolicy`] - Per-route authentication requirement

#![doc(html_root_url = "https://docs.rs/janus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod policy;
mod principal;

pub use context::{BindingState, IdentityContext, RequestId};
pub use error::{PrincipalError, PrincipalResult};
pub use policy::SecurityPolicy;
pub use principal::{JsonPrincipal, NullPrincipal, Principal, PrincipalVariant, SENTINEL_NAME};
