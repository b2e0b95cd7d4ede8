//! Structured logging for JWS operations
//!
//! Events go through `tracing`; installing a subscriber is the
//! application's job. Key material is never logged, only key ids and sizes.

use crate::error::JwsError;
use tracing::{debug, warn};

/// Logging helpers shared by the signing and verification paths
pub(crate) struct LoggingTransformer;

impl LoggingTransformer {
    /// Log a failed sign or verify call
    pub(crate) fn log_jws_error(operation: &str, error: &JwsError) {
        warn!(
            operation,
            kind = error.kind(),
            %error,
            "JWS operation failed"
        );
    }

    /// Log a produced token
    pub(crate) fn log_signed(kid: &str, payload_len: usize, token_len: usize) {
        debug!(kid, payload_len, token_len, "Signed compact JWS");
    }

    /// Log an accepted token
    pub(crate) fn log_verified(kid: &str, payload_len: usize) {
        debug!(kid, payload_len, "Verified compact JWS");
    }
}
