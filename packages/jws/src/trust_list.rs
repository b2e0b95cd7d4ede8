//! Signed trust lists
//!
//! A trust list travels as a compact JWS with header
//! `{"alg":"ES256","typ":"trustlist+jwt","kid":...}` and its JSON document
//! as payload. The signer's public key is published as a JWK carrying the
//! same `kid`, `use = "sig"` and `alg = "ES256"`.

use crate::{
    crypto::es256_keys::{KeyPair, PublicKey},
    error::{JwsError, JwsResult},
    jwk::Jwk,
    service::{JwsConfig, JwsService},
    types::JwsHeader,
};
use serde::{de::DeserializeOwned, Serialize};

/// Header `typ` of signed trust lists
pub const TRUST_LIST_TYP: &str = "trustlist+jwt";

/// Signs trust-list documents with one key
#[derive(Debug, Clone)]
pub struct TrustListSigner {
    key: KeyPair,
    kid: String,
    service: JwsService,
}

impl TrustListSigner {
    /// Signer using `key`, advertised under `kid`
    #[must_use]
    pub fn new(key: KeyPair, kid: &str) -> Self {
        Self {
            key,
            kid: kid.to_string(),
            service: JwsService::new(),
        }
    }

    /// Key id placed in every header
    #[must_use]
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Serialize `trust_list` to JSON and sign it.
    ///
    /// # Errors
    /// Returns [`JwsError::Serialization`] if the document cannot be
    /// serialized, or any error from [`JwsService::sign`].
    pub fn sign<T: Serialize + ?Sized>(&self, trust_list: &T) -> JwsResult<String> {
        let payload = serde_json::to_vec(trust_list)
            .map_err(|e| JwsError::serialization(&format!("trust list: {e}")))?;
        self.sign_bytes(&payload)
    }

    /// Sign an already serialized trust-list document as-is.
    ///
    /// # Errors
    /// Any error from [`JwsService::sign`].
    pub fn sign_bytes(&self, payload: &[u8]) -> JwsResult<String> {
        let header = JwsHeader::new(TRUST_LIST_TYP, &self.kid);
        self.service.sign(&header, payload, &self.key)
    }

    /// Public JWK to publish alongside signed lists
    #[must_use]
    pub fn public_jwk(&self) -> Jwk {
        self.key.public_key().to_jwk(&self.kid)
    }
}

/// Verifies signed trust lists against a published key
#[derive(Debug, Clone)]
pub struct TrustListVerifier {
    key: PublicKey,
    expected_kid: Option<String>,
    service: JwsService,
}

impl TrustListVerifier {
    /// Verifier accepting any `kid` signed by `key`
    #[must_use]
    pub fn new(key: PublicKey) -> Self {
        Self {
            key,
            expected_kid: None,
            service: JwsService::with_config(JwsConfig::new().with_expected_typ(TRUST_LIST_TYP)),
        }
    }

    /// Verifier built from a published JWK.
    ///
    /// When the JWK has a `kid`, tokens must carry the same one.
    ///
    /// # Errors
    /// Returns [`JwsError::KeyFormat`] if the JWK is not a P-256 signing key.
    pub fn from_jwk(jwk: &Jwk) -> JwsResult<Self> {
        let mut verifier = Self::new(jwk.to_public_key()?);
        verifier.expected_kid = jwk.kid.clone();
        Ok(verifier)
    }

    /// Verify a signed trust list and parse its document.
    ///
    /// # Errors
    /// - any error from [`JwsService::verify`]; a `typ` other than
    ///   `trustlist+jwt` is a [`JwsError::MalformedToken`]
    /// - [`JwsError::MalformedToken`] if the header `kid` differs from the
    ///   JWK's
    /// - [`JwsError::Serialization`] if the payload does not parse as `T`
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> JwsResult<(JwsHeader, T)> {
        let verified = self.service.verify(token, &self.key)?;
        if let Some(expected) = &self.expected_kid {
            if &verified.header.kid != expected {
                return Err(JwsError::malformed_token(&format!(
                    "expected kid {expected}, found {}",
                    verified.header.kid
                )));
            }
        }
        let trust_list = verified.payload_json()?;
        Ok((verified.header, trust_list))
    }
}
