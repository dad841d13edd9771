//! Base64 armoring for envelope components
//!
//! The synchronization store only holds text, so every binary envelope
//! component (sealed payload, salt, nonce) crosses it as standard base64.
//! Decoding rejects malformed text before any cipher call is attempted.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::CryptoError;

/// Encode raw bytes as base64 text
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64 text back into raw bytes
pub fn decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::Encoding(format!("invalid base64: {}", e)))
}
