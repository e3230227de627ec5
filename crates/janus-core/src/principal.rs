//! Principal variants and their type tags.
//!
//! A [`Principal`] represents "who the request runs as" after resolution.
//! The set of variants is closed: handlers declare exactly one of them as a
//! parameter type, and the resolver constructs that variant. There is no
//! "no principal" outcome on a successful resolution; routes without an
//! authentication requirement receive the variant's sentinel form instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed name carried by the sentinel form of every variant.
///
/// A sentinel principal means "authenticated as nobody". It is a value,
/// never the absence of one, so handlers can rely on a principal being
/// present regardless of route policy.
pub const SENTINEL_NAME: &str = "null";

/// Type tag selecting one concrete principal variant.
///
/// This is the closed set of variants the registry can construct. The
/// dispatch layer derives the tag from the matched handler's declared
/// parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalVariant {
    /// A principal decoded from a structured JSON payload.
    Json,
    /// The sentinel variant, "authenticated as nobody".
    Null,
}

impl PrincipalVariant {
    /// All registered variants, in declaration order.
    pub const ALL: [Self; 2] = [Self::Json, Self::Null];

    /// Returns the snake_case name of this variant.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for PrincipalVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A principal decoded from a structured payload.
///
/// Always carries a non-empty name; [`JsonPrincipal::new`] rejects empty
/// input and [`JsonPrincipal::sentinel`] covers the "no data supplied" case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonPrincipal {
    name: String,
}

impl JsonPrincipal {
    /// Creates a principal from a decoded name.
    ///
    /// Returns `None` for an empty name, which would violate the non-empty
    /// invariant of this variant.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Self { name })
        }
    }

    /// The sentinel form of this variant, named [`SENTINEL_NAME`].
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            name: SENTINEL_NAME.to_string(),
        }
    }

    /// Returns the principal's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The sentinel variant, representing "authenticated as nobody".
///
/// Its name is the fixed constant [`SENTINEL_NAME`]. Distinguishable by
/// type from a principal that carries real identity data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NullPrincipal;

impl NullPrincipal {
    /// The fixed name of this variant.
    pub const NAME: &'static str = SENTINEL_NAME;

    /// Returns the principal's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// A resolved principal: one value of the closed variant set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Principal {
    /// Decoded from a structured payload.
    Json(JsonPrincipal),
    /// The sentinel, "authenticated as nobody".
    Null(NullPrincipal),
}

impl Principal {
    /// Returns the principal's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Json(p) => p.name(),
            Self::Null(p) => p.name(),
        }
    }

    /// Returns the concrete variant tag of this value.
    #[must_use]
    pub const fn variant(&self) -> PrincipalVariant {
        match self {
            Self::Json(_) => PrincipalVariant::Json,
            Self::Null(_) => PrincipalVariant::Null,
        }
    }

    /// Returns a string identifier suitable for logging.
    ///
    /// The format is `<variant>:<name>`, except for the null variant whose
    /// tag and name coincide.
    #[must_use]
    pub fn log_id(&self) -> String {
        match self {
            Self::Json(p) => format!("json:{}", p.name()),
            Self::Null(_) => "null".to_string(),
        }
    }
}

impl From<JsonPrincipal> for Principal {
    fn from(principal: JsonPrincipal) -> Self {
        Self::Json(principal)
    }
}

impl From<NullPrincipal> for Principal {
    fn from(principal: NullPrincipal) -> Self {
        Self::Null(principal)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
