//! Verification API
//!
//! Leaf to root: [`decoder`] splits and decodes the compact form,
//! [`claims`] holds the header and claim predicates, [`algorithms`] checks
//! the RS256 signature, and [`pipeline`] runs them in order.

pub mod algorithms;
pub mod async_ops;
pub mod claims;
pub mod decoder;
pub mod extract;
pub mod pipeline;

pub use algorithms::{Rs256PublicKey, verify_rs256};
pub use async_ops::AsyncVerification;
pub use decoder::{CompactToken, decode};
pub use extract::{bearer_from_header, extract_token, token_from_query};
pub use pipeline::Verifier;
