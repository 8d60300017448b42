//! RSA-SHA256 (RS256) signature verification
//!
//! PKCS#1 v1.5 over SHA-256. The padding check inside `rsa` compares the
//! recovered encoding in constant time, so a mismatch takes as long as a
//! near-match.

use crate::error::SignatureError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::Verifier;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPublicKey, pkcs8::DecodePublicKey};

const PEM_PREFIX: &[u8] = b"-----BEGIN";

/// Trusted RSA public key, ready for RS256 verification
pub struct Rs256PublicKey {
    verifying_key: VerifyingKey<Sha256>,
    modulus_len: usize,
}

impl std::fmt::Debug for Rs256PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256PublicKey")
            .field("modulus_bits", &self.modulus_bits())
            .finish()
    }
}

impl Rs256PublicKey {
    /// Smallest modulus accepted for a trust anchor
    pub const MIN_MODULUS_BITS: usize = 2048;

    /// Parse key material in any supported form
    ///
    /// Accepts PEM (`PUBLIC KEY` or `RSA PUBLIC KEY`), DER (SPKI or
    /// PKCS#1), or the bare base64 body of a PEM block.
    ///
    /// # Errors
    /// Returns [`SignatureError::MalformedKey`] when nothing parses or the
    /// modulus is shorter than [`Self::MIN_MODULUS_BITS`].
    pub fn parse(material: &[u8]) -> Result<Self, SignatureError> {
        let trimmed = material.trim_ascii();
        if trimmed.is_empty() {
            return Err(SignatureError::MalformedKey("key material is empty".into()));
        }

        if trimmed.starts_with(PEM_PREFIX) {
            let pem = std::str::from_utf8(trimmed)
                .map_err(|_| SignatureError::MalformedKey("PEM is not UTF-8".into()))?;
            return Self::from_pem(pem);
        }

        let der_err = match Self::from_der(trimmed) {
            Ok(key) => return Ok(key),
            Err(e) => e,
        };

        // bare base64 body, as pasted from a PEM file without its armor
        let body: Vec<u8> = trimmed
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        match STANDARD.decode(&body) {
            Ok(der) => Self::from_der(&der),
            Err(_) => Err(der_err),
        }
    }

    /// Parse a PEM-armored key
    ///
    /// Literal `\n` sequences are turned into newlines first, which is how
    /// multi-line keys usually survive an environment variable.
    ///
    /// # Errors
    /// Returns [`SignatureError::MalformedKey`] for anything that is not an
    /// RSA public key of acceptable size.
    pub fn from_pem(pem: &str) -> Result<Self, SignatureError> {
        let pem = pem.trim().replace("\\n", "\n");
        let key = RsaPublicKey::from_public_key_pem(&pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(&pem))
            .map_err(|e| SignatureError::MalformedKey(format!("Invalid RSA public key PEM: {e}")))?;
        Self::from_rsa(key)
    }

    /// Parse a DER-encoded key (SPKI first, then PKCS#1)
    ///
    /// # Errors
    /// Returns [`SignatureError::MalformedKey`] for anything that is not an
    /// RSA public key of acceptable size.
    pub fn from_der(der: &[u8]) -> Result<Self, SignatureError> {
        let key = match RsaPublicKey::from_public_key_der(der) {
            Ok(key) => key,
            Err(spki_err) => RsaPublicKey::from_pkcs1_der(der).map_err(|_| {
                SignatureError::MalformedKey(format!("Invalid RSA public key DER: {spki_err}"))
            })?,
        };
        Self::from_rsa(key)
    }

    fn from_rsa(key: RsaPublicKey) -> Result<Self, SignatureError> {
        let modulus_len = key.size();
        if modulus_len * 8 < Self::MIN_MODULUS_BITS {
            return Err(SignatureError::MalformedKey(format!(
                "RSA modulus must be at least {} bits, got {}",
                Self::MIN_MODULUS_BITS,
                modulus_len * 8
            )));
        }
        Ok(Self {
            verifying_key: VerifyingKey::<Sha256>::new(key),
            modulus_len,
        })
    }

    /// Modulus size in bits
    #[must_use]
    pub fn modulus_bits(&self) -> usize {
        self.modulus_len * 8
    }
}

/// Verify an RS256 signature over `signing_input`
///
/// `Ok(false)` is an ordinary mismatch. Errors are reserved for signature
/// bytes that cannot be an RS256 signature under this key.
///
/// # Errors
/// Returns [`SignatureError::MalformedSignature`] when the signature length
/// differs from the modulus length.
pub fn verify_rs256(
    signing_input: &[u8],
    signature: &[u8],
    public_key: &Rs256PublicKey,
) -> Result<bool, SignatureError> {
    if signature.len() != public_key.modulus_len {
        return Err(SignatureError::MalformedSignature);
    }
    let signature = Signature::try_from(signature).map_err(|_| SignatureError::MalformedSignature)?;

    match public_key.verifying_key.verify(signing_input, &signature) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}
