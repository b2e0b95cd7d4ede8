//! Compact JSON Web Signature (JWS) engine for ES256
//!
//! This crate provides:
//! - ES256 (ECDSA P-256 / SHA-256) signing and verification of compact JWS
//! - Fixed-length R‖S signatures with DER conversion for interop
//! - JWK export and import with fixed-width coordinates
//! - Algorithm pinning: tokens can never choose their own algorithm
//! - Trust-list signing on top of the engine
//!
//! ```no_run
//! use trustsig_jws::{JwsHeader, KeyPair};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pem = std::fs::read("keys/trust-list-signer.pem")?;
//! let key = KeyPair::from_bytes(&pem)?;
//! let header = JwsHeader::new("trustlist+jwt", "trust-list-signer-2025");
//! let token = trustsig_jws::sign(&header, br#"{"version":1}"#, &key)?;
//! let verified = trustsig_jws::verify(&token, &key.public_key())?;
//! assert_eq!(verified.payload, br#"{"version":1}"#);
//! # Ok(())
//! # }
//! ```

pub mod compact;
pub mod crypto;
mod error;
pub mod jwk;
mod logging;
pub mod service;
pub mod trust_list;
mod types;

pub use compact::JwsMessage;
pub use crypto::{
    es256_keys::{KeyPair, PublicKey},
    signature_encoding::{der_to_fixed, fixed_to_der, ES256_SIGNATURE_LEN},
};
pub use error::*;
pub use jwk::Jwk;
pub use service::{JwsConfig, JwsService};
pub use trust_list::{TrustListSigner, TrustListVerifier, TRUST_LIST_TYP};
pub use types::*;

/// Sign `payload` under `header` with the default configuration.
///
/// # Errors
/// See [`JwsService::sign`].
pub fn sign(header: &JwsHeader, payload: &[u8], key: &KeyPair) -> JwsResult<String> {
    JwsService::new().sign(header, payload, key)
}

/// Verify a compact JWS with the default configuration.
///
/// # Errors
/// See [`JwsService::verify`].
pub fn verify(token: &str, key: &PublicKey) -> JwsResult<VerifiedJws> {
    JwsService::new().verify(token, key)
}

/// Export `key` as a public JWK with the given optional members.
#[must_use]
pub fn export_public_jwk(
    key: &PublicKey,
    kid: Option<&str>,
    key_use: Option<&str>,
    alg: Option<Algorithm>,
) -> Jwk {
    let mut jwk = Jwk::from_public_key(key);
    jwk.kid = kid.map(str::to_string);
    jwk.key_use = key_use.map(str::to_string);
    jwk.alg = alg.map(|alg| alg.as_str().to_string());
    jwk
}

/// Import a public key from its JWK form.
///
/// # Errors
/// See [`Jwk::to_public_key`].
pub fn import_jwk(jwk: &Jwk) -> JwsResult<PublicKey> {
    jwk.to_public_key()
}
