//! Compact JWS serialization: `b64u(header) "." b64u(payload) "." b64u(signature)`
//!
//! base64url is RFC 4648 §5 without padding. Decoding rejects `=` padding,
//! characters outside the URL-safe alphabet and non-canonical trailing bits,
//! so every accepted segment re-encodes to exactly the text it came from.

use crate::error::{JwsError, JwsResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

const SEPARATOR: char = '.';

/// Base64url encoding without padding
#[inline]
#[must_use]
pub fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64url decoding without padding
///
/// # Errors
/// Returns [`base64::DecodeError`] for padding, illegal characters or
/// non-canonical trailing bits.
#[inline]
pub fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Decoded segments of a compact JWS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwsMessage {
    /// Protected header bytes (UTF-8 JSON)
    pub header: Vec<u8>,
    /// Payload bytes
    pub payload: Vec<u8>,
    /// Signature bytes
    pub signature: Vec<u8>,
}

impl JwsMessage {
    /// The exact bytes covered by the signature.
    #[must_use]
    pub fn signing_input(&self) -> String {
        signing_input(&self.header, &self.payload)
    }
}

/// Build the signing input `b64u(header) "." b64u(payload)`.
#[must_use]
pub fn signing_input(header: &[u8], payload: &[u8]) -> String {
    let header_b64 = base64_url_encode(header);
    let payload_b64 = base64_url_encode(payload);

    let mut input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
    input.push_str(&header_b64);
    input.push(SEPARATOR);
    input.push_str(&payload_b64);
    input
}

/// Serialize the three segments into a compact JWS string.
#[must_use]
pub fn encode(header: &[u8], payload: &[u8], signature: &[u8]) -> String {
    let input = signing_input(header, payload);
    let signature_b64 = base64_url_encode(signature);

    let mut token = String::with_capacity(input.len() + 1 + signature_b64.len());
    token.push_str(&input);
    token.push(SEPARATOR);
    token.push_str(&signature_b64);
    token
}

/// Split and decode a compact JWS string.
///
/// # Errors
/// Returns [`JwsError::MalformedToken`] if there are not exactly three
/// segments or a segment is not valid unpadded base64url.
pub fn decode(token: &str) -> JwsResult<JwsMessage> {
    let segments: Vec<&str> = token.split(SEPARATOR).collect();
    let [header_b64, payload_b64, signature_b64] = segments.as_slice() else {
        return Err(JwsError::malformed_token(&format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    Ok(JwsMessage {
        header: decode_segment("header", header_b64)?,
        payload: decode_segment("payload", payload_b64)?,
        signature: decode_segment("signature", signature_b64)?,
    })
}

fn decode_segment(name: &str, segment: &str) -> JwsResult<Vec<u8>> {
    base64_url_decode(segment)
        .map_err(|e| JwsError::malformed_token(&format!("{name} segment: {e}")))
}
