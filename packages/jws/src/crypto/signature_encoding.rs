//! Conversions between ASN.1 DER and fixed-length R‖S ECDSA signatures
//!
//! JOSE requires the fixed-length form (RFC 7518 §3.4). Tools such as
//! OpenSSL emit DER by default; these helpers are the only place the crate
//! touches DER.

use crate::error::{JwsError, JwsResult};
use p256::ecdsa::Signature;

/// Length of a P-256 R‖S signature: 32-byte `r` followed by 32-byte `s`
pub const ES256_SIGNATURE_LEN: usize = 64;

/// Convert a DER `ECDSA-Sig-Value` into the 64-byte R‖S form.
///
/// # Errors
/// Returns [`JwsError::SignatureEncoding`] if `der` is not a valid P-256 DER
/// signature.
pub fn der_to_fixed(der: &[u8]) -> JwsResult<[u8; ES256_SIGNATURE_LEN]> {
    let signature = Signature::from_der(der)
        .map_err(|e| JwsError::signature_encoding(&format!("invalid DER signature: {e}")))?;
    Ok(to_fixed(&signature))
}

/// Convert a 64-byte R‖S signature into DER.
///
/// # Errors
/// Returns [`JwsError::SignatureFormat`] if `fixed` is not 64 bytes, or
/// [`JwsError::SignatureEncoding`] if `r`/`s` is zero or not below the group
/// order.
pub fn fixed_to_der(fixed: &[u8]) -> JwsResult<Vec<u8>> {
    let signature = parse_fixed(fixed)?
        .ok_or_else(|| JwsError::signature_encoding("r or s is out of range"))?;
    Ok(signature.to_der().as_bytes().to_vec())
}

/// R‖S bytes of a parsed signature.
pub(crate) fn to_fixed(signature: &Signature) -> [u8; ES256_SIGNATURE_LEN] {
    let mut fixed = [0u8; ES256_SIGNATURE_LEN];
    fixed.copy_from_slice(&signature.to_bytes());
    fixed
}

/// Parse a fixed-length signature.
///
/// `Err` means the length is wrong; `Ok(None)` means the length is right but
/// `r` or `s` is zero or not below the group order, which no valid
/// signature can have.
pub(crate) fn parse_fixed(fixed: &[u8]) -> JwsResult<Option<Signature>> {
    if fixed.len() != ES256_SIGNATURE_LEN {
        return Err(JwsError::signature_format(fixed.len()));
    }
    Ok(Signature::from_slice(fixed).ok())
}
