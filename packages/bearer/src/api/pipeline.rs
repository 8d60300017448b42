//! Verification pipeline
//!
//! decode → algorithm → signature → expiration → issuer → audience.
//! Each step either hands its value on or rejects; the first rejection ends
//! the pass and later checks are never evaluated. Callers only ever see a
//! [`VerificationOutcome`]; the reason goes to the `tracing` diagnostics.

use super::algorithms::verify_rs256;
use super::claims::{audience_is_valid, expiration_is_valid, issuer_is_valid, validate_algorithm};
use super::decoder::{CompactToken, decode};
use super::extract::extract_token;
use crate::config::TrustConfiguration;
use crate::error::{SignatureError, VerifyError, VerifyResult};
use crate::types::{DecodedPayload, VerificationOutcome};
use std::sync::Arc;

/// Bearer token verifier bound to one trust configuration
///
/// Cheap to clone; clones share the configuration.
#[derive(Debug, Clone)]
pub struct Verifier {
    config: Arc<TrustConfiguration>,
}

impl Verifier {
    /// Verifier trusting `config`
    #[must_use]
    pub fn new(config: Arc<TrustConfiguration>) -> Self {
        Self { config }
    }

    /// Shared trust configuration
    #[must_use]
    pub fn config(&self) -> &Arc<TrustConfiguration> {
        &self.config
    }

    /// Verify `raw` as of `now` (seconds since epoch)
    ///
    /// Never fails: every rejection collapses to
    /// [`VerificationOutcome::rejected`].
    #[must_use]
    pub fn verify(&self, raw: &str, now: i64) -> VerificationOutcome {
        match self.diagnose(raw, now) {
            Ok(payload) => {
                tracing::trace!("bearer token authorized");
                VerificationOutcome::authorized(payload.scope.unwrap_or_default())
            }
            Err(err) => {
                tracing::debug!(stage = err.stage(), reason = %err, "bearer token rejected");
                VerificationOutcome::rejected()
            }
        }
    }

    /// Verify `raw` against the current wall clock
    #[must_use]
    pub fn verify_now(&self, raw: &str) -> VerificationOutcome {
        self.verify(raw, chrono::Utc::now().timestamp())
    }

    /// Run the pipeline and keep the rejection reason
    ///
    /// For operator tooling and logs. Do not forward the error to the
    /// party that presented the token.
    ///
    /// # Errors
    /// The [`VerifyError`] of the first failing stage.
    pub fn diagnose(&self, raw: &str, now: i64) -> VerifyResult<DecodedPayload> {
        let token = decode(raw)?;
        validate_algorithm(token.header())?;
        self.check_signature(&token)?;

        let payload = token.payload();
        if !expiration_is_valid(payload, now) {
            return Err(VerifyError::Expired);
        }
        if !issuer_is_valid(payload, self.config.issuer()) {
            return Err(VerifyError::IssuerMismatch);
        }
        if !audience_is_valid(payload, self.config.audience()) {
            return Err(VerifyError::AudienceMismatch);
        }

        Ok(token.into_payload())
    }

    /// Locate the token in request parts, then verify it
    ///
    /// `authorization` is the `Authorization` header value and `query` the
    /// raw query string. The query is consulted only when the configuration
    /// allows it. No token means not authorized.
    #[must_use]
    pub fn authorize_request(
        &self,
        authorization: Option<&str>,
        query: Option<&str>,
        now: i64,
    ) -> VerificationOutcome {
        match extract_token(self.config.token_source(), authorization, query) {
            Some(token) => self.verify(&token, now),
            None => {
                tracing::debug!(stage = "extract", "no bearer token presented");
                VerificationOutcome::rejected()
            }
        }
    }

    fn check_signature(&self, token: &CompactToken<'_>) -> Result<(), SignatureError> {
        if verify_rs256(token.signing_input(), token.signature(), self.config.public_key())? {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}
