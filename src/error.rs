//! Custom error types for BudgetDuo
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Errors produced by the cryptographic primitives
///
/// These propagate out of key derivation, the AEAD, and the payload codec so
/// that single-record callers (such as passphrase verification) can
/// distinguish success from failure. The one place they are recovered locally
/// is batch decryption, which turns any failure into an error-flagged record.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key derivation was handed a malformed salt
    #[error("Key derivation error: {0}")]
    Derivation(String),

    /// Base64 text in an envelope could not be decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The serialized sensitive-field payload was structurally invalid
    #[error("Payload error: {0}")]
    Decode(String),

    /// The AEAD could not seal a payload
    #[error("Seal error: {0}")]
    Seal(String),

    /// The AEAD refused the ciphertext. Wrong key, wrong nonce, and
    /// tampering are intentionally indistinguishable here.
    #[error("Authentication failed")]
    Authentication,
}

/// The main error type for BudgetDuo operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Snapshot storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Passphrase handling errors (prompting, mismatch, rejection)
    #[error("Passphrase error: {0}")]
    Passphrase(String),

    /// Errors from the encryption core
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl BudgetError {
    /// Check if this error came from the encryption core
    pub fn is_crypto(&self) -> bool {
        matches!(self, Self::Crypto(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for BudgetDuo operations
pub type BudgetResult<T> = Result<T, BudgetError>;
