//! Bearer verification error types
//!
//! Per-request errors never cross the public verification boundary: the
//! pipeline collapses every one of them into a rejected
//! [`VerificationOutcome`](crate::VerificationOutcome). They are kept apart
//! so diagnostics can say which stage refused a token.
//! [`ConfigurationError`] is the exception and is raised at startup.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Result type for a single verification pass
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Which of the three compact segments an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// First segment, the JOSE header
    Header,
    /// Second segment, the claims payload
    Payload,
    /// Third segment, the signature bytes
    Signature,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Header => f.write_str("header"),
            Segment::Payload => f.write_str("payload"),
            Segment::Signature => f.write_str("signature"),
        }
    }
}

/// Compact serialization decoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not exactly three non-empty dot-separated segments
    #[error("token must have exactly three non-empty segments")]
    MalformedStructure,

    /// A segment is not valid unpadded base64url
    #[error("{0} segment is not valid base64url")]
    MalformedEncoding(Segment),

    /// A decoded segment is not a well-formed JSON object
    #[error("{0} segment is not a well-formed claims object")]
    MalformedClaims(Segment),
}

/// Algorithm allow-list failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    /// Header carries no `alg`
    #[error("header has no alg")]
    Missing,

    /// Header names an algorithm other than RS256
    #[error("algorithm {0:?} is not allowed")]
    Disallowed(String),
}

/// Signature check failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Well-formed signature that does not match the signing input
    #[error("signature does not match")]
    Mismatch,

    /// Signature bytes cannot be an RS256 signature under the configured key
    #[error("signature bytes are malformed")]
    MalformedSignature,

    /// Key material unusable for verification
    #[error("public key is unusable: {0}")]
    MalformedKey(String),
}

/// A single verification pass failed at one stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Token could not be decoded
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Header algorithm rejected
    #[error("algorithm check failed: {0}")]
    Algorithm(#[from] AlgorithmError),

    /// Signature rejected
    #[error("signature check failed: {0}")]
    Signature(#[from] SignatureError),

    /// `exp` is missing or not strictly in the future
    #[error("token has expired")]
    Expired,

    /// `iss` does not equal the configured issuer
    #[error("issuer does not match")]
    IssuerMismatch,

    /// `aud` does not equal the configured audience
    #[error("audience does not match")]
    AudienceMismatch,
}

impl VerifyError {
    /// Name of the pipeline stage that rejected the token
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            VerifyError::Decode(_) => "decode",
            VerifyError::Algorithm(_) => "algorithm",
            VerifyError::Signature(_) => "signature",
            VerifyError::Expired => "expiration",
            VerifyError::IssuerMismatch => "issuer",
            VerifyError::AudienceMismatch => "audience",
        }
    }
}

/// Startup failures that must keep the verifier from serving
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Neither an inline key nor a key file was configured
    #[error("public key is not configured")]
    MissingPublicKey,

    /// Configured key material is not a usable RSA public key
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Query parameter extraction enabled without a parameter name
    #[error("url parameter name is required when url parameters are allowed")]
    MissingUrlParamName,

    /// Key file could not be read
    #[error("failed to read public key file {path}: {source}")]
    KeyFile {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Settings sources could not be merged or extracted
    #[error("settings error: {0}")]
    Settings(String),
}

impl From<figment::Error> for ConfigurationError {
    fn from(err: figment::Error) -> Self {
        ConfigurationError::Settings(err.to_string())
    }
}
