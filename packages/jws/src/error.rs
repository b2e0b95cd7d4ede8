//! JWS error types

use thiserror::Error;

/// JWS operation result type
pub type JwsResult<T> = Result<T, JwsError>;

/// Errors surfaced by key handling, serialization, signing and verification.
///
/// "The signature did not match" ([`JwsError::SignatureInvalid`]) and "the
/// input was structurally wrong" (every other variant) are always distinct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwsError {
    /// Malformed, unsupported or wrong-curve key input
    #[error("Invalid key format: {0}")]
    KeyFormat(String),

    /// Compact token does not have three segments or a segment is not valid base64url
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Signature blob is not exactly 64 bytes
    #[error("Invalid signature length: expected 64 bytes, got {actual}")]
    SignatureFormat {
        /// Length of the rejected signature in bytes
        actual: usize,
    },

    /// DER signature is not valid, or a fixed-length signature carries an
    /// out-of-range `r`/`s`
    #[error("Invalid signature encoding: {0}")]
    SignatureEncoding(String),

    /// Header `alg` is not the pinned algorithm
    #[error("Algorithm mismatch: expected ES256, found {found}")]
    AlgorithmMismatch {
        /// The `alg` value that was rejected
        found: String,
    },

    /// Signature is well formed but does not verify
    #[error("Invalid JWS signature")]
    SignatureInvalid,

    /// Header or payload could not be serialized to JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The signing primitive failed
    #[error("Signing error: {0}")]
    Signing(String),
}

impl JwsError {
    /// Create a key format error
    #[inline]
    #[must_use]
    pub fn key_format(msg: &str) -> Self {
        JwsError::KeyFormat(msg.to_string())
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed_token(msg: &str) -> Self {
        JwsError::MalformedToken(msg.to_string())
    }

    /// Create a signature format error
    #[inline]
    #[must_use]
    pub fn signature_format(actual: usize) -> Self {
        JwsError::SignatureFormat { actual }
    }

    /// Create a signature encoding error
    #[inline]
    #[must_use]
    pub fn signature_encoding(msg: &str) -> Self {
        JwsError::SignatureEncoding(msg.to_string())
    }

    /// Create an algorithm mismatch error
    #[inline]
    #[must_use]
    pub fn algorithm_mismatch(found: &str) -> Self {
        JwsError::AlgorithmMismatch {
            found: found.to_string(),
        }
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwsError::Serialization(msg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        JwsError::Signing(msg.to_string())
    }

    /// Short, stable name of the error kind, used in log events.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            JwsError::KeyFormat(_) => "key_format",
            JwsError::MalformedToken(_) => "malformed_token",
            JwsError::SignatureFormat { .. } => "signature_format",
            JwsError::SignatureEncoding(_) => "signature_encoding",
            JwsError::AlgorithmMismatch { .. } => "algorithm_mismatch",
            JwsError::SignatureInvalid => "signature_invalid",
            JwsError::Serialization(_) => "serialization",
            JwsError::Signing(_) => "signing",
        }
    }
}
