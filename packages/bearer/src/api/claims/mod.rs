//! Header and claim predicates
//!
//! Stateless checks over decoded views. None of them reads the clock or the
//! environment; the pipeline passes in everything they compare against.

pub mod validation;

pub use validation::{
    audience_is_valid, check_algorithm, expiration_is_valid, issuer_is_valid, validate_algorithm,
};
