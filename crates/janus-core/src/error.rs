//! Error types for the principal resolution contract.
//!
//! All five kinds are local, synchronous failures surfaced to the enclosing
//! dispatch layer; none are used for expected control flow. In particular,
//! the "no authentication configured" path is a designed success outcome
//! (a sentinel principal), not an error.

use crate::context::RequestId;
use crate::principal::PrincipalVariant;
use http::StatusCode;
use thiserror::Error;

/// Result type alias using [`PrincipalError`].
pub type PrincipalResult<T> = Result<T, PrincipalError>;

/// The contract's error kinds.
#[derive(Error, Debug)]
pub enum PrincipalError {
    /// A second resolution was attempted for the same request.
    #[error("principal already resolved for request {request_id}")]
    DoubleResolution {
        /// The request whose context was already resolved.
        request_id: RequestId,
    },

    /// The route mandates authentication and no valid credentials were
    /// presented.
    #[error("authentication required: {message}")]
    AuthenticationRequired {
        /// Human-readable rejection reason.
        message: String,
        /// Underlying collaborator failure, if any (not exposed to clients).
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The requested variant has no registered construction rule.
    #[error("unsupported principal variant: {variant}")]
    UnsupportedVariant {
        /// The variant the handler declared.
        variant: PrincipalVariant,
    },

    /// The resolved principal's variant does not match the declared
    /// parameter's variant.
    #[error("binding expects {expected} principal, resolved {found}")]
    BindingTypeMismatch {
        /// The variant the binding site declared.
        expected: PrincipalVariant,
        /// The variant that was actually resolved.
        found: PrincipalVariant,
    },

    /// Binding ran before resolution; should not occur in correct pipelines.
    #[error("no principal resolved before binding")]
    UnresolvedPrincipal,
}

impl PrincipalError {
    /// Creates an authentication-required error.
    #[must_use]
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::AuthenticationRequired {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an authentication-required error carrying the collaborator
    /// failure that caused it.
    pub fn authentication_required_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::AuthenticationRequired {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the HTTP status code the dispatch layer should answer with.
    ///
    /// Only `AuthenticationRequired` is a client fault; the remaining kinds
    /// indicate a broken pipeline and map to a server error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthenticationRequired { .. } => StatusCode::UNAUTHORIZED,
            Self::DoubleResolution { .. }
            | Self::UnsupportedVariant { .. }
            | Self::BindingTypeMismatch { .. }
            | Self::UnresolvedPrincipal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a machine-readable error code suitable for error envelopes.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DoubleResolution { .. } => "DOUBLE_RESOLUTION",
            Self::AuthenticationRequired { .. } => "AUTHENTICATION_REQUIRED",
            Self::UnsupportedVariant { .. } => "UNSUPPORTED_PRINCIPAL_VARIANT",
            Self::BindingTypeMismatch { .. } => "BINDING_TYPE_MISMATCH",
            Self::UnresolvedPrincipal => "UNRESOLVED_PRINCIPAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_required() {
        let err = PrincipalError::authentication_required("missing credentials");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "AUTHENTICATION_REQUIRED");
        assert!(err.to_string().contains("missing credentials"));
    }

    #[test]
    fn test_authentication_required_with_source() {
        let source = anyhow::anyhow!("token store unreachable");
        let err =
            PrincipalError::authentication_required_with_source("authenticator failure", source);

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        let source = std::error::Error::source(&err).expect("source should be attached");
        assert!(source.to_string().contains("token store unreachable"));
    }

    #[test]
    fn test_double_resolution() {
        let request_id = RequestId::new();
        let err = PrincipalError::DoubleResolution { request_id };

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "DOUBLE_RESOLUTION");
        assert!(err.to_string().contains(&request_id.to_string()));
    }

    #[test]
    fn test_unsupported_variant() {
        let err = PrincipalError::UnsupportedVariant {
            variant: PrincipalVariant::Json,
        };

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "UNSUPPORTED_PRINCIPAL_VARIANT");
        assert!(err.to_string().contains("json"));
    }

    #[test]
    fn test_binding_type_mismatch_names_both_variants() {
        let err = PrincipalError::BindingTypeMismatch {
            expected: PrincipalVariant::Json,
            found: PrincipalVariant::Null,
        };

        assert_eq!(err.error_code(), "BINDING_TYPE_MISMATCH");
        let message = err.to_string();
        assert!(message.contains("json"));
        assert!(message.contains("null"));
    }

    #[test]
    fn test_unresolved_principal() {
        let err = PrincipalError::UnresolvedPrincipal;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "UNRESOLVED_PRINCIPAL");
    }
}
