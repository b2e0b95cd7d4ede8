//! JWS type definitions

use crate::error::{JwsError, JwsResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header parameter names owned by [`JwsHeader`]'s typed fields.
const RESERVED_PARAMS: [&str; 3] = ["alg", "typ", "kid"];

/// Signing algorithms this engine accepts.
///
/// There is exactly one. The tag is still checked explicitly at sign and
/// verify time so a token can never select its own algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// ECDSA on P-256 with SHA-256
    Es256,
}

impl Algorithm {
    /// The pinned algorithm.
    pub const PINNED: Algorithm = Algorithm::Es256;

    /// Header `alg` value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::Es256 => "ES256",
        }
    }

    /// Resolve a header `alg` value against the pinned algorithm.
    ///
    /// # Errors
    /// Returns [`JwsError::AlgorithmMismatch`] for anything but `"ES256"`,
    /// compared case-sensitively.
    pub fn from_header(alg: &str) -> JwsResult<Self> {
        if alg == Self::PINNED.as_str() {
            Ok(Self::PINNED)
        } else {
            Err(JwsError::algorithm_mismatch(alg))
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWS protected header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwsHeader {
    /// Signing algorithm, always `"ES256"` for headers this engine produces
    pub alg: String,
    /// Media type of the complete JWS, e.g. `trustlist+jwt`
    pub typ: String,
    /// Key identifier, opaque to the engine
    pub kid: String,
    /// Any further header parameters, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JwsHeader {
    /// ES256 header with the given type and key id.
    #[must_use]
    pub fn new(typ: &str, kid: &str) -> Self {
        Self {
            alg: Algorithm::PINNED.as_str().to_string(),
            typ: typ.to_string(),
            kid: kid.to_string(),
            extra: Map::new(),
        }
    }

    /// Add an extra header parameter.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: Value) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }

    /// Look up an extra header parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Serialize the header to the exact bytes that get signed.
    ///
    /// # Errors
    /// Returns [`JwsError::Serialization`] when an extra parameter shadows
    /// `alg`, `typ` or `kid`, or JSON encoding fails.
    pub fn to_json_bytes(&self) -> JwsResult<Vec<u8>> {
        if let Some(name) = RESERVED_PARAMS
            .iter()
            .find(|name| self.extra.contains_key(**name))
        {
            return Err(JwsError::serialization(&format!(
                "extra header parameter '{name}' shadows a typed field"
            )));
        }
        serde_json::to_vec(self).map_err(|e| JwsError::serialization(&e.to_string()))
    }

    /// Parse header JSON taken from a token.
    ///
    /// The `alg` pin is checked before the remaining fields are looked at,
    /// so a foreign algorithm is reported as such even when the rest of the
    /// header would not parse.
    ///
    /// # Errors
    /// - [`JwsError::MalformedToken`] if the bytes are not a JSON object or
    ///   `alg`, `typ` or `kid` are missing or not strings
    /// - [`JwsError::AlgorithmMismatch`] if `alg` is not `"ES256"`
    pub fn from_json_bytes(bytes: &[u8]) -> JwsResult<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| JwsError::malformed_token(&format!("header is not valid JSON: {e}")))?;
        let object = value
            .as_object()
            .ok_or_else(|| JwsError::malformed_token("header is not a JSON object"))?;
        let alg = object
            .get("alg")
            .and_then(Value::as_str)
            .ok_or_else(|| JwsError::malformed_token("header has no string 'alg'"))?;
        Algorithm::from_header(alg)?;

        serde_json::from_value(value)
            .map_err(|e| JwsError::malformed_token(&format!("invalid header: {e}")))
    }
}

/// Outcome of a successful verification
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedJws {
    /// Parsed protected header
    pub header: JwsHeader,
    /// Payload bytes exactly as they were signed
    pub payload: Vec<u8>,
}

impl VerifiedJws {
    /// Parse the payload as JSON.
    ///
    /// # Errors
    /// Returns [`JwsError::Serialization`] if the payload does not parse as `T`.
    pub fn payload_json<T: serde::de::DeserializeOwned>(&self) -> JwsResult<T> {
        serde_json::from_slice(&self.payload)
            .map_err(|e| JwsError::serialization(&format!("payload: {e}")))
    }
}
