//! Decoded token views and the verification outcome

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The only algorithm identifier the verifier accepts
pub const ALLOWED_ALGORITHM: &str = "RS256";

/// JOSE header of a compact token
///
/// Only `alg` is typed. `typ` and `kid` are hints nothing checks, so any
/// JSON value is carried as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedHeader {
    /// Signing algorithm identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Token type hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<Value>,
    /// Key ID hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<Value>,
}

impl DecodedHeader {
    /// `typ`, when it is a string
    #[must_use]
    pub fn token_type(&self) -> Option<&str> {
        self.typ.as_ref().and_then(Value::as_str)
    }

    /// `kid`, when it is a string
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.kid.as_ref().and_then(Value::as_str)
    }
}

/// `aud` as it appears on the wire
///
/// Only [`Audience::Single`] can satisfy a configured audience. Lists and
/// other shapes are carried so they decode, not so they match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// A single audience string
    Single(String),
    /// A list of audience strings
    Many(Vec<String>),
    /// Anything else
    Other(Value),
}

/// Claims payload of a compact token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedPayload {
    /// Expiration time (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
    /// Issuer, as sent; only a string can match a configured issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<Value>,
    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Opaque scope string handed to the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Remaining claims, untouched
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl DecodedPayload {
    /// `iss`, when it is a string
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.iss.as_ref().and_then(Value::as_str)
    }

    /// Scope claim, or the empty string when absent
    #[must_use]
    pub fn scope_or_empty(&self) -> &str {
        self.scope.as_deref().unwrap_or("")
    }
}

/// Result of one verification, as seen by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the token passed every check
    pub authorized: bool,
    /// Scope claim of an authorized token; empty otherwise
    pub scope: String,
}

impl VerificationOutcome {
    /// Outcome for an accepted token
    #[must_use]
    pub fn authorized(scope: impl Into<String>) -> Self {
        Self {
            authorized: true,
            scope: scope.into(),
        }
    }

    /// Outcome for a rejected token, whatever the reason
    #[must_use]
    pub fn rejected() -> Self {
        Self::default()
    }
}
