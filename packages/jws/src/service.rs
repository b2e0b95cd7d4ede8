//! Sign and verify orchestration over the compact serializer and ES256 primitives

use crate::{
    compact,
    crypto::{
        es256_keys::{KeyPair, PublicKey},
        es256_signing::es256_sign,
        es256_verification::es256_verify,
    },
    error::{JwsError, JwsResult},
    logging::LoggingTransformer,
    types::{Algorithm, JwsHeader, VerifiedJws},
};

/// Longest token [`JwsService::verify`] accepts by default (16 MiB)
pub const DEFAULT_MAX_TOKEN_LEN: usize = 16 * 1024 * 1024;

/// Verification settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwsConfig {
    max_token_len: usize,
    expected_typ: Option<String>,
}

impl Default for JwsConfig {
    fn default() -> Self {
        Self {
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            expected_typ: None,
        }
    }
}

impl JwsConfig {
    /// Default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject tokens longer than `max_token_len` bytes before decoding them.
    #[must_use]
    pub fn with_max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len;
        self
    }

    /// Require the header `typ` to equal `typ`.
    #[must_use]
    pub fn with_expected_typ(mut self, typ: &str) -> Self {
        self.expected_typ = Some(typ.to_string());
        self
    }

    /// Maximum accepted token length in bytes
    #[must_use]
    pub fn max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Required header `typ`, if any
    #[must_use]
    pub fn expected_typ(&self) -> Option<&str> {
        self.expected_typ.as_deref()
    }
}

/// Stateless ES256 compact JWS signer and verifier
///
/// Holds only its configuration, so one instance can be shared across
/// threads and used with any number of keys.
#[derive(Debug, Clone, Default)]
pub struct JwsService {
    config: JwsConfig,
}

impl JwsService {
    /// Service with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Service with an explicit configuration
    #[must_use]
    pub fn with_config(config: JwsConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &JwsConfig {
        &self.config
    }

    /// Sign `payload` under `header` and return the compact JWS.
    ///
    /// The header is serialized once and those exact bytes are signed.
    ///
    /// # Errors
    /// - [`JwsError::AlgorithmMismatch`] if `header.alg` is not `ES256`
    /// - [`JwsError::Serialization`] if the header cannot be encoded
    /// - [`JwsError::Signing`] if the primitive fails
    pub fn sign(&self, header: &JwsHeader, payload: &[u8], key: &KeyPair) -> JwsResult<String> {
        let result = Self::sign_compact(header, payload, key);
        match &result {
            Ok(token) => LoggingTransformer::log_signed(&header.kid, payload.len(), token.len()),
            Err(e) => LoggingTransformer::log_jws_error("jws_signing", e),
        }
        result
    }

    /// Verify a compact JWS and return its header and payload.
    ///
    /// The `alg` pin is enforced before any signature math, and the signature
    /// is checked over the decoded bytes, never a re-serialization.
    ///
    /// # Errors
    /// - [`JwsError::MalformedToken`] for an oversized token, wrong segment
    ///   count, bad base64url, an unparseable header, or a `typ` other than
    ///   the configured one
    /// - [`JwsError::AlgorithmMismatch`] if the header `alg` is not `ES256`
    /// - [`JwsError::SignatureFormat`] if the signature is not 64 bytes
    /// - [`JwsError::SignatureInvalid`] if the signature does not verify
    pub fn verify(&self, token: &str, key: &PublicKey) -> JwsResult<VerifiedJws> {
        let result = self.verify_compact(token, key);
        match &result {
            Ok(verified) => {
                LoggingTransformer::log_verified(&verified.header.kid, verified.payload.len());
            }
            Err(e) => LoggingTransformer::log_jws_error("jws_verification", e),
        }
        result
    }

    fn sign_compact(header: &JwsHeader, payload: &[u8], key: &KeyPair) -> JwsResult<String> {
        Algorithm::from_header(&header.alg)?;
        let header_bytes = header.to_json_bytes()?;

        let signing_input = compact::signing_input(&header_bytes, payload);
        let signature = es256_sign(signing_input.as_bytes(), key)?;

        Ok(compact::encode(&header_bytes, payload, &signature))
    }

    fn verify_compact(&self, token: &str, key: &PublicKey) -> JwsResult<VerifiedJws> {
        if token.len() > self.config.max_token_len {
            return Err(JwsError::malformed_token(&format!(
                "token is {} bytes, limit is {}",
                token.len(),
                self.config.max_token_len
            )));
        }

        let message = compact::decode(token)?;
        let header = JwsHeader::from_json_bytes(&message.header)?;

        if !es256_verify(message.signing_input().as_bytes(), &message.signature, key)? {
            return Err(JwsError::SignatureInvalid);
        }

        if let Some(expected) = self.config.expected_typ() {
            if header.typ != expected {
                return Err(JwsError::malformed_token(&format!(
                    "expected typ {expected}, found {}",
                    header.typ
                )));
            }
        }

        Ok(VerifiedJws {
            header,
            payload: message.payload,
        })
    }
}
