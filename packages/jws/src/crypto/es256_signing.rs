//! ES256 signing with ECDSA P-256

use super::{
    es256_keys::KeyPair,
    signature_encoding::{to_fixed, ES256_SIGNATURE_LEN},
};
use crate::error::{JwsError, JwsResult};
use p256::ecdsa::{signature::Signer, Signature};

/// Sign `signing_input` with ECDSA over SHA-256.
///
/// Returns the fixed-length R‖S signature, never DER.
///
/// # Errors
/// Returns [`JwsError::Signing`] if the primitive fails.
pub fn es256_sign(signing_input: &[u8], key: &KeyPair) -> JwsResult<[u8; ES256_SIGNATURE_LEN]> {
    let signature: Signature = key
        .signing_key()
        .try_sign(signing_input)
        .map_err(|e| JwsError::signing(&e.to_string()))?;
    Ok(to_fixed(&signature))
}
