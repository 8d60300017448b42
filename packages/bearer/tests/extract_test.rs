//! Token location: Authorization header and optional query parameter

mod common;

use common::*;
use cryypt_bearer::api::{bearer_from_header, extract_token, token_from_query};
use cryypt_bearer::{TokenSource, VerificationOutcome};

#[test]
fn test_bearer_header_parsing() {
    assert_eq!(bearer_from_header("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    assert_eq!(bearer_from_header("bearer abc"), Some("abc"));
    assert_eq!(bearer_from_header("BEARER   abc  "), Some("abc"));
    assert_eq!(bearer_from_header("  Bearer\tabc"), Some("abc"));

    assert_eq!(bearer_from_header("Bearer"), None);
    assert_eq!(bearer_from_header("Bearer    "), None);
    assert_eq!(bearer_from_header("Basic dXNlcjpwYXNz"), None);
    assert_eq!(bearer_from_header("Bearerabc"), None);
    assert_eq!(bearer_from_header(""), None);
}

#[test]
fn test_query_parameter_lookup() {
    assert_eq!(token_from_query("access_token=abc", "access_token").as_deref(), Some("abc"));
    assert_eq!(token_from_query("?a=1&access_token=abc&b=2", "access_token").as_deref(), Some("abc"));
    assert_eq!(token_from_query("t=a%2Eb%2Ec", "t").as_deref(), Some("a.b.c"));
    assert_eq!(token_from_query("t=first&t=second", "t").as_deref(), Some("first"));

    assert_eq!(token_from_query("t=", "t"), None);
    assert_eq!(token_from_query("other=abc", "t"), None);
    assert_eq!(token_from_query("", "t"), None);
}

#[test]
fn test_header_only_policy_ignores_query() {
    let source = TokenSource::HeaderOnly;

    assert_eq!(
        extract_token(&source, Some("Bearer h.h.h"), Some("t=q.q.q")).as_deref(),
        Some("h.h.h")
    );
    assert_eq!(extract_token(&source, None, Some("t=q.q.q")), None);
}

#[test]
fn test_query_policy_prefers_header() {
    let source = TokenSource::HeaderOrQuery { param: "t".into() };

    assert_eq!(
        extract_token(&source, Some("Bearer h.h.h"), Some("t=q.q.q")).as_deref(),
        Some("h.h.h")
    );
    assert_eq!(
        extract_token(&source, None, Some("t=q.q.q")).as_deref(),
        Some("q.q.q")
    );
    // a non-bearer header does not block the query fallback
    assert_eq!(
        extract_token(&source, Some("Basic xyz"), Some("t=q.q.q")).as_deref(),
        Some("q.q.q")
    );
    assert_eq!(extract_token(&source, None, None), None);
}

#[test]
fn test_authorize_request_from_header() {
    let token = mint(&rs256_header(), &payload_with_scope("read"));
    let header = format!("Bearer {token}");

    let outcome = trusted_verifier().authorize_request(Some(&header), None, NOW);
    assert_eq!(outcome, VerificationOutcome::authorized("read"));
}

#[test]
fn test_authorize_request_without_token_is_rejected() {
    let outcome = trusted_verifier().authorize_request(None, None, NOW);
    assert_eq!(outcome, VerificationOutcome::rejected());
}

#[test]
fn test_authorize_request_query_needs_policy() {
    let token = mint(&rs256_header(), &payload_with_scope("read"));
    let query = format!("access_token={token}");

    let header_only = trusted_verifier();
    assert_eq!(
        header_only.authorize_request(None, Some(&query), NOW),
        VerificationOutcome::rejected()
    );

    let with_query = verifier_for(
        trusted_config()
            .with_url_param("access_token")
            .expect("non-empty name"),
    );
    assert_eq!(
        with_query.authorize_request(None, Some(&query), NOW),
        VerificationOutcome::authorized("read")
    );
}

#[test]
fn test_bad_header_token_does_not_fall_back_to_query() {
    let good = mint(&rs256_header(), &payload_with_scope("read"));
    let bad = flip_signature_byte(&good);
    let header = format!("Bearer {bad}");
    let query = format!("access_token={good}");

    let verifier = verifier_for(
        trusted_config()
            .with_url_param("access_token")
            .expect("non-empty name"),
    );
    assert_eq!(
        verifier.authorize_request(Some(&header), Some(&query), NOW),
        VerificationOutcome::rejected()
    );
}
