//! JSON Web Key (RFC 7517) form of ES256 keys
//!
//! Coordinates are always emitted as exactly 32 big-endian bytes. They are
//! copied out of the fixed-size uncompressed SEC1 point, never from a big
//! integer, so leading zero bytes survive export.

use crate::{
    compact::{base64_url_decode, base64_url_encode},
    crypto::es256_keys::{KeyPair, PublicKey, P256_FIELD_LEN},
    error::{JwsError, JwsResult},
    types::Algorithm,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// `kty` of elliptic-curve keys
pub const KTY_EC: &str = "EC";
/// `crv` of P-256 keys
pub const CRV_P256: &str = "P-256";
/// `use` of signature keys
pub const USE_SIG: &str = "sig";

/// EC JSON Web Key
///
/// A private scalar `d` is accepted when parsing but is never serialized,
/// never shown by `Debug`, and is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, `"EC"`
    pub kty: String,
    /// Curve, `"P-256"`
    pub crv: String,
    /// base64url of the 32-byte x coordinate
    pub x: String,
    /// base64url of the 32-byte y coordinate
    pub y: String,
    /// Key identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Intended use, `"sig"` for signing keys
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    /// Algorithm the key is meant for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// base64url of the private scalar
    #[serde(default, skip_serializing)]
    pub d: Option<String>,
}

impl Jwk {
    /// Public JWK of `key` with no optional members set.
    #[must_use]
    pub fn from_public_key(key: &PublicKey) -> Self {
        let (x, y) = key.coordinates();
        Self {
            kty: KTY_EC.to_string(),
            crv: CRV_P256.to_string(),
            x: base64_url_encode(&x),
            y: base64_url_encode(&y),
            kid: None,
            key_use: None,
            alg: None,
            d: None,
        }
    }

    /// Set `kid`.
    #[must_use]
    pub fn with_kid(mut self, kid: &str) -> Self {
        self.kid = Some(kid.to_string());
        self
    }

    /// Set `use`.
    #[must_use]
    pub fn with_use(mut self, key_use: &str) -> Self {
        self.key_use = Some(key_use.to_string());
        self
    }

    /// Set `alg`.
    #[must_use]
    pub fn with_alg(mut self, alg: Algorithm) -> Self {
        self.alg = Some(alg.as_str().to_string());
        self
    }

    /// Whether a private scalar is present.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }

    /// Reconstruct the public key.
    ///
    /// # Errors
    /// Returns [`JwsError::KeyFormat`] if `kty`/`crv` are not `EC`/`P-256`, a
    /// declared `alg` is not `ES256`, a declared `use` is not `sig`, a
    /// coordinate does not decode to exactly 32 bytes, or the point is not on
    /// the curve.
    pub fn to_public_key(&self) -> JwsResult<PublicKey> {
        if self.kty != KTY_EC {
            return Err(JwsError::key_format(&format!(
                "JWK kty must be {KTY_EC}, got {}",
                self.kty
            )));
        }
        if self.crv != CRV_P256 {
            return Err(JwsError::key_format(&format!(
                "JWK crv must be {CRV_P256}, got {}",
                self.crv
            )));
        }
        if let Some(alg) = &self.alg {
            Algorithm::from_header(alg)
                .map_err(|_| JwsError::key_format(&format!("JWK alg {alg} is not ES256")))?;
        }
        if let Some(key_use) = &self.key_use {
            if key_use != USE_SIG {
                return Err(JwsError::key_format(&format!(
                    "JWK use must be {USE_SIG}, got {key_use}"
                )));
            }
        }

        let x = decode_field_element("x", &self.x)?;
        let y = decode_field_element("y", &self.y)?;
        PublicKey::from_coordinates(&x, &y)
    }

    /// Reconstruct the signing key from a private JWK.
    ///
    /// # Errors
    /// Returns [`JwsError::KeyFormat`] if `d` is missing or malformed, or does
    /// not belong to the public coordinates.
    pub fn to_key_pair(&self) -> JwsResult<KeyPair> {
        let public_key = self.to_public_key()?;
        let d = self
            .d
            .as_deref()
            .ok_or_else(|| JwsError::key_format("JWK has no private scalar 'd'"))?;
        let scalar = Zeroizing::new(decode_field_element("d", d)?);
        let key_pair = KeyPair::from_scalar(&scalar)?;
        if key_pair.public_key() != public_key {
            return Err(JwsError::key_format(
                "JWK private scalar does not match its public coordinates",
            ));
        }
        Ok(key_pair)
    }

    /// RFC 7638 SHA-256 thumbprint, base64url encoded.
    ///
    /// # Errors
    /// Returns [`JwsError::KeyFormat`] if the JWK is not a valid P-256 key.
    pub fn thumbprint(&self) -> JwsResult<String> {
        let canonical = Self::from_public_key(&self.to_public_key()?);
        // Required members only, lexicographic order, no whitespace
        let input = format!(
            r#"{{"crv":"{}","kty":"{}","x":"{}","y":"{}"}}"#,
            canonical.crv, canonical.kty, canonical.x, canonical.y
        );
        Ok(base64_url_encode(&Sha256::digest(input.as_bytes())))
    }

    /// Serialize to JSON. `d` is never included.
    ///
    /// # Errors
    /// Returns [`JwsError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> JwsResult<String> {
        serde_json::to_string(self).map_err(|e| JwsError::serialization(&e.to_string()))
    }

    /// Parse from JSON. Members other than the known ones are ignored.
    ///
    /// # Errors
    /// Returns [`JwsError::KeyFormat`] if the JSON is not a JWK object.
    pub fn from_json(json: &str) -> JwsResult<Self> {
        serde_json::from_str(json).map_err(|e| JwsError::key_format(&format!("Invalid JWK: {e}")))
    }
}

impl Drop for Jwk {
    fn drop(&mut self) {
        if let Some(d) = self.d.as_mut() {
            d.zeroize();
        }
    }
}

impl fmt::Debug for Jwk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jwk")
            .field("kty", &self.kty)
            .field("crv", &self.crv)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("kid", &self.kid)
            .field("use", &self.key_use)
            .field("alg", &self.alg)
            .field("d", &self.d.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl PublicKey {
    /// Export as a public JWK with `kid`, `use` and `alg` set.
    #[must_use]
    pub fn to_jwk(&self, kid: &str) -> Jwk {
        Jwk::from_public_key(self)
            .with_kid(kid)
            .with_use(USE_SIG)
            .with_alg(Algorithm::PINNED)
    }
}

fn decode_field_element(name: &str, value: &str) -> JwsResult<Vec<u8>> {
    let bytes = base64_url_decode(value)
        .map_err(|e| JwsError::key_format(&format!("JWK '{name}' is not base64url: {e}")))?;
    if bytes.len() != P256_FIELD_LEN {
        return Err(JwsError::key_format(&format!(
            "JWK '{name}' must decode to {P256_FIELD_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}
