//! Secure random generation for salts and nonces
//!
//! Both values must come from the operating system's CSPRNG. A seeded or
//! non-cryptographic generator here would silently break the confidentiality
//! guarantees of the whole envelope scheme.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

use super::encryption::NONCE_LEN;
use super::key_derivation::SALT_LEN;

/// Generate a fresh 16-byte key derivation salt
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Generate a fresh 12-byte AES-GCM nonce
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}
