//! Property tests: rejection never depends on luck

mod common;

use common::*;
use cryypt_bearer::{DecodeError, VerificationOutcome, VerifyError};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_arbitrary_input_is_rejected(raw in ".{0,200}") {
        prop_assert_eq!(trusted_verifier().verify(&raw, NOW), VerificationOutcome::rejected());
    }

    #[test]
    fn prop_wrong_segment_count_is_malformed(
        segments in prop::collection::vec("[A-Za-z0-9_-]{1,16}", 0..8)
            .prop_filter("three segments is a different case", |s| s.len() != 3)
    ) {
        let raw = segments.join(".");
        prop_assert_eq!(
            trusted_verifier().diagnose(&raw, NOW).unwrap_err(),
            VerifyError::Decode(DecodeError::MalformedStructure)
        );
    }

    #[test]
    fn prop_only_rs256_is_accepted(alg in "[A-Za-z0-9]{0,10}") {
        let token = mint(&json!({ "alg": alg }), &payload_with_scope("read"));
        let outcome = trusted_verifier().verify(&token, NOW);
        prop_assert_eq!(outcome.authorized, alg == "RS256");
    }

    #[test]
    fn prop_exp_at_or_before_now_is_rejected(age in 0i64..1_000_000) {
        let token = mint(&rs256_header(), &json!({ "exp": NOW - age, "scope": "read" }));
        prop_assert_eq!(trusted_verifier().diagnose(&token, NOW).unwrap_err(), VerifyError::Expired);
    }

    #[test]
    fn prop_exp_after_now_is_authorized(ttl in 1i64..1_000_000, scope in "[ -~]{0,32}") {
        let token = mint(&rs256_header(), &json!({ "exp": NOW + ttl, "scope": scope }));
        prop_assert_eq!(
            trusted_verifier().verify(&token, NOW),
            VerificationOutcome::authorized(scope)
        );
    }

    #[test]
    fn prop_any_signature_bit_flip_is_rejected(byte in 0usize..256, bit in 0u8..8) {
        let token = mint(&rs256_header(), &payload_with_scope("read"));
        let (signing_input, signature) = token.rsplit_once('.').expect("segments");
        let mut bytes = cryypt_bearer::api::algorithms::utils::base64_url_decode(signature)
            .expect("signature decodes");
        bytes[byte] ^= 1 << bit;
        let tampered = format!(
            "{signing_input}.{}",
            cryypt_bearer::api::algorithms::utils::base64_url_encode(&bytes)
        );

        prop_assert_eq!(trusted_verifier().verify(&tampered, NOW), VerificationOutcome::rejected());
    }
}
