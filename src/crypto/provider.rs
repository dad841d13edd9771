//! The crypto capability seam
//!
//! `CryptoProvider` bundles key derivation, the AEAD, and secure random
//! generation behind one trait so the record layer never reaches for
//! primitives directly. Production code uses `OsCrypto`; tests substitute a
//! provider with fixed salts and nonces to get deterministic envelopes.

use crate::error::CryptoError;

use super::encryption::{self, NONCE_LEN};
use super::key_derivation::{self, DerivedKey, SALT_LEN};
use super::random;

/// Capability interface over the cryptographic primitives
pub trait CryptoProvider {
    /// Generate a fresh key derivation salt
    fn generate_salt(&self) -> [u8; SALT_LEN];

    /// Generate a fresh AEAD nonce
    fn generate_nonce(&self) -> [u8; NONCE_LEN];

    /// Derive a symmetric key from a passphrase and salt
    fn derive_key(&self, passphrase: &str, salt: &[u8]) -> Result<DerivedKey, CryptoError>;

    /// Seal a plaintext payload under (key, nonce)
    fn seal(
        &self,
        key: &DerivedKey,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Open a sealed payload under (key, nonce)
    fn open(
        &self,
        key: &DerivedKey,
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
}

/// The production provider: PBKDF2 key derivation, AES-256-GCM, OS randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct OsCrypto;

impl CryptoProvider for OsCrypto {
    fn generate_salt(&self) -> [u8; SALT_LEN] {
        random::generate_salt()
    }

    fn generate_nonce(&self) -> [u8; NONCE_LEN] {
        random::generate_nonce()
    }

    fn derive_key(&self, passphrase: &str, salt: &[u8]) -> Result<DerivedKey, CryptoError> {
        key_derivation::derive_key(passphrase, salt)
    }

    fn seal(
        &self,
        key: &DerivedKey,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        encryption::seal(key, nonce, plaintext)
    }

    fn open(
        &self,
        key: &DerivedKey,
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        encryption::open(key, nonce, sealed)
    }
}
