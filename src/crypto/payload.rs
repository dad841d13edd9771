//! Serialization of the sensitive field subset
//!
//! The subset crosses the cipher as canonical JSON: struct fields serialize
//! in declaration order, so identical values always produce identical
//! plaintext bytes.

use crate::error::CryptoError;
use crate::models::SensitiveFields;

/// Encode the sensitive subset to plaintext bytes
pub fn encode(fields: &SensitiveFields) -> Result<Vec<u8>, CryptoError> {
    serde_json::to_vec(fields)
        .map_err(|e| CryptoError::Decode(format!("failed to serialize sensitive fields: {}", e)))
}

/// Decode plaintext bytes back into the sensitive subset
pub fn decode(bytes: &[u8]) -> Result<SensitiveFields, CryptoError> {
    serde_json::from_slice(bytes)
        .map_err(|e| CryptoError::Decode(format!("malformed sensitive payload: {}", e)))
}
