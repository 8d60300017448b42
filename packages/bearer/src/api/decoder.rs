//! Compact serialization decoder
//!
//! Splits `header.payload.signature`, base64url-decodes each part and parses
//! the header and payload as JSON objects. The signing input is kept as a
//! slice of the caller's string so the signature is always checked against
//! the bytes exactly as received.

use super::algorithms::utils::base64_url_decode;
use crate::error::{DecodeError, Segment};
use crate::types::{DecodedHeader, DecodedPayload};
use serde::de::DeserializeOwned;

/// A decoded compact token, borrowing its encoded segments from the input
#[derive(Debug, Clone)]
pub struct CompactToken<'a> {
    header_segment: &'a str,
    payload_segment: &'a str,
    signing_input: &'a str,
    signature: Vec<u8>,
    header: DecodedHeader,
    payload: DecodedPayload,
}

impl<'a> CompactToken<'a> {
    /// Encoded header segment as received
    #[must_use]
    pub fn header_segment(&self) -> &'a str {
        self.header_segment
    }

    /// Encoded payload segment as received
    #[must_use]
    pub fn payload_segment(&self) -> &'a str {
        self.payload_segment
    }

    /// `header_segment || "." || payload_segment`, untouched
    #[must_use]
    pub fn signing_input(&self) -> &'a [u8] {
        self.signing_input.as_bytes()
    }

    /// Raw signature bytes
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Decoded header
    #[must_use]
    pub fn header(&self) -> &DecodedHeader {
        &self.header
    }

    /// Decoded payload
    #[must_use]
    pub fn payload(&self) -> &DecodedPayload {
        &self.payload
    }

    /// Give up the segments and keep the decoded payload
    #[must_use]
    pub fn into_payload(self) -> DecodedPayload {
        self.payload
    }
}

/// Decode a compact-serialized token
///
/// # Errors
/// - [`DecodeError::MalformedStructure`] unless the input has exactly three
///   non-empty dot-separated segments
/// - [`DecodeError::MalformedEncoding`] when a segment is not base64url
/// - [`DecodeError::MalformedClaims`] when the header or payload is not a
///   well-formed JSON object
pub fn decode(raw: &str) -> Result<CompactToken<'_>, DecodeError> {
    let mut parts = raw.split('.');
    let (header_segment, payload_segment, signature_segment) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(p), Some(s), None) if !h.is_empty() && !p.is_empty() && !s.is_empty() => {
                (h, p, s)
            }
            _ => return Err(DecodeError::MalformedStructure),
        };

    let header: DecodedHeader = decode_object(header_segment, Segment::Header)?;
    let payload: DecodedPayload = decode_object(payload_segment, Segment::Payload)?;
    let signature = base64_url_decode(signature_segment)
        .map_err(|_| DecodeError::MalformedEncoding(Segment::Signature))?;

    // header and payload are adjacent in `raw`, so the signing input is a prefix
    let signing_input = &raw[..header_segment.len() + 1 + payload_segment.len()];

    Ok(CompactToken {
        header_segment,
        payload_segment,
        signing_input,
        signature,
        header,
        payload,
    })
}

fn decode_object<T: DeserializeOwned>(segment: &str, which: Segment) -> Result<T, DecodeError> {
    let bytes = base64_url_decode(segment).map_err(|_| DecodeError::MalformedEncoding(which))?;
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| DecodeError::MalformedClaims(which))?;
    if !value.is_object() {
        return Err(DecodeError::MalformedClaims(which));
    }
    serde_json::from_value(value).map_err(|_| DecodeError::MalformedClaims(which))
}
