//! ES256 key handles and signature primitives

pub mod es256_keys;
pub mod es256_signing;
pub mod es256_verification;
pub mod signature_encoding;
