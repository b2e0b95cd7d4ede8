//! ES256 verification with ECDSA P-256

use super::{es256_keys::PublicKey, signature_encoding::parse_fixed};
use crate::error::JwsResult;
use p256::ecdsa::signature::Verifier;

/// Verify a fixed-length R‖S signature over `signing_input`.
///
/// Fails closed: every cryptographic failure, including `r`/`s` outside the
/// group order, is `Ok(false)`.
///
/// # Errors
/// Returns [`crate::JwsError::SignatureFormat`] if `signature` is not
/// exactly 64 bytes.
pub fn es256_verify(signing_input: &[u8], signature: &[u8], key: &PublicKey) -> JwsResult<bool> {
    let Some(signature) = parse_fixed(signature)? else {
        return Ok(false);
    };
    Ok(key.verifying_key().verify(signing_input, &signature).is_ok())
}
