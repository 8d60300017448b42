//! Shared fixtures: RSA key pairs and a token minter for the test suites

#![allow(dead_code)]

use cryypt_bearer::api::algorithms::utils::base64_url_encode;
use cryypt_bearer::{TrustConfiguration, Verifier};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};

pub const TRUSTED_PRIVATE_PEM: &str = include_str!("../fixtures/trusted_private.pem");
pub const TRUSTED_PUBLIC_PEM: &str = include_str!("../fixtures/trusted_public.pem");
pub const TRUSTED_PUBLIC_PKCS1_PEM: &str = include_str!("../fixtures/trusted_public_pkcs1.pem");
pub const TRUSTED_PUBLIC_DER: &[u8] = include_bytes!("../fixtures/trusted_public.der");
pub const UNTRUSTED_PRIVATE_PEM: &str = include_str!("../fixtures/untrusted_private.pem");
pub const UNTRUSTED_PUBLIC_PEM: &str = include_str!("../fixtures/untrusted_public.pem");
pub const WEAK_PUBLIC_PEM: &str = include_str!("../fixtures/weak_public.pem");
pub const WEAK_PUBLIC_DER: &[u8] = include_bytes!("../fixtures/weak_public.der");

/// Fixed clock for deterministic tests
pub const NOW: i64 = 1_700_000_000;

fn signing_key(private_pem: &str) -> &'static SigningKey<Sha256> {
    static TRUSTED: OnceLock<SigningKey<Sha256>> = OnceLock::new();
    static UNTRUSTED: OnceLock<SigningKey<Sha256>> = OnceLock::new();

    let cell = if private_pem == TRUSTED_PRIVATE_PEM {
        &TRUSTED
    } else {
        &UNTRUSTED
    };
    cell.get_or_init(|| {
        let key = RsaPrivateKey::from_pkcs8_pem(private_pem).expect("fixture private key parses");
        SigningKey::<Sha256>::new(key)
    })
}

pub fn encode_json(value: &Value) -> String {
    base64_url_encode(value.to_string().as_bytes())
}

pub fn sign_with(private_pem: &str, signing_input: &str) -> Vec<u8> {
    signing_key(private_pem).sign(signing_input.as_bytes()).to_vec()
}

pub fn mint_with(private_pem: &str, header: &Value, payload: &Value) -> String {
    let signing_input = format!("{}.{}", encode_json(header), encode_json(payload));
    let signature = sign_with(private_pem, &signing_input);
    format!("{signing_input}.{}", base64_url_encode(&signature))
}

/// Token signed by the trusted key
pub fn mint(header: &Value, payload: &Value) -> String {
    mint_with(TRUSTED_PRIVATE_PEM, header, payload)
}

pub fn rs256_header() -> Value {
    json!({ "alg": "RS256", "typ": "JWT" })
}

/// Payload valid for an hour after [`NOW`] carrying `scope`
pub fn payload_with_scope(scope: &str) -> Value {
    json!({ "exp": NOW + 3600, "scope": scope })
}

pub fn trusted_config() -> TrustConfiguration {
    TrustConfiguration::from_key_material(TRUSTED_PUBLIC_PEM).expect("fixture public key parses")
}

pub fn verifier_for(config: TrustConfiguration) -> Verifier {
    Verifier::new(Arc::new(config))
}

pub fn trusted_verifier() -> Verifier {
    verifier_for(trusted_config())
}

/// Same token with one signature byte inverted
pub fn flip_signature_byte(token: &str) -> String {
    let (signing_input, signature) = token.rsplit_once('.').expect("three segments");
    let mut bytes = cryypt_bearer::api::algorithms::utils::base64_url_decode(signature)
        .expect("signature decodes");
    bytes[0] ^= 0x01;
    format!("{signing_input}.{}", base64_url_encode(&bytes))
}
