//! Signature algorithms
//!
//! RS256 is the only scheme the verifier knows; the allow-list check in
//! [`crate::api::claims`] keeps every other `alg` away from this module.

pub mod rsa;
pub mod utils;

pub use rsa::{Rs256PublicKey, verify_rs256};
