//! Algorithm, expiration, issuer and audience predicates

use crate::config::Expectation;
use crate::error::AlgorithmError;
use crate::types::{ALLOWED_ALGORITHM, Audience, DecodedHeader, DecodedPayload};

/// Exact, case-sensitive match against the single allowed algorithm
///
/// # Errors
/// [`AlgorithmError::Missing`] without an `alg`, [`AlgorithmError::Disallowed`]
/// for any other value, including `none` and the HMAC family.
pub fn validate_algorithm(header: &DecodedHeader) -> Result<(), AlgorithmError> {
    match header.alg.as_deref() {
        None => Err(AlgorithmError::Missing),
        Some(ALLOWED_ALGORITHM) => Ok(()),
        Some(other) => Err(AlgorithmError::Disallowed(other.to_string())),
    }
}

/// Whether the header names the allowed algorithm
#[inline]
#[must_use]
pub fn check_algorithm(header: &DecodedHeader) -> bool {
    validate_algorithm(header).is_ok()
}

/// `exp` strictly after `now`; an equal timestamp is already expired
#[inline]
#[must_use]
pub fn expiration_is_valid(payload: &DecodedPayload, now: i64) -> bool {
    #[allow(clippy::cast_precision_loss)]
    let now = now as f64;
    payload.exp.is_some_and(|exp| exp - now > 0.0)
}

/// `iss` equals the expected issuer, or no issuer is expected
///
/// A non-string `iss` only passes when no issuer is expected.
#[inline]
#[must_use]
pub fn issuer_is_valid(payload: &DecodedPayload, expected: &Expectation) -> bool {
    expected.accepts(payload.issuer())
}

/// `aud` equals the expected audience, or no audience is expected
///
/// A list-valued or non-string `aud` never satisfies a configured audience.
#[inline]
#[must_use]
pub fn audience_is_valid(payload: &DecodedPayload, expected: &Expectation) -> bool {
    let actual = match &payload.aud {
        Some(Audience::Single(aud)) => Some(aud.as_str()),
        Some(Audience::Many(_) | Audience::Other(_)) | None => None,
    };
    expected.accepts(actual)
}
