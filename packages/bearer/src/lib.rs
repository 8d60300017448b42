//! RS256 bearer token verification
//!
//! Given a compact-serialized token and a [`TrustConfiguration`], decide
//! whether the token is authentic, unexpired and meant for this service,
//! and hand back its `scope` claim:
//!
//! - exactly one algorithm, RS256, with no fallback
//! - fail-fast checks in a fixed order; callers see only
//!   [`VerificationOutcome`]
//! - the trust configuration is built once and never mutated; a missing or
//!   unusable key is a startup error, never a per-request one
//!
//! ```no_run
//! use cryypt_bearer::{TrustConfiguration, Verifier};
//!
//! # fn main() -> Result<(), cryypt_bearer::ConfigurationError> {
//! let verifier = Verifier::new(TrustConfiguration::load()?);
//! let outcome = verifier.authorize_request(Some("Bearer eyJ..."), None, 1_700_000_000);
//! if outcome.authorized {
//!     println!("scope: {}", outcome.scope);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
mod error;
mod types;

pub use api::{AsyncVerification, CompactToken, Rs256PublicKey, Verifier, decode};
pub use config::{Expectation, TokenSource, TrustConfiguration, TrustSettings};
pub use error::*;
pub use types::*;
