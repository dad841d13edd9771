//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives encryption keys from the shared passphrase. PBKDF2 with a high
//! iteration count raises the cost of offline guessing against a captured
//! envelope; the iteration count is a fixed constant, never derived from
//! input. The same (passphrase, salt) pair always yields the same key.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Size of the key derivation salt in bytes
pub const SALT_LEN: usize = 16;

/// Size of the derived key in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A derived encryption key
///
/// Zeroes its bytes on drop so the key does not outlive the operation
/// that needed it.
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive an AES-256 key from a passphrase and salt
///
/// Fails only on a salt of the wrong length. Passphrase content is never
/// rejected here: an empty passphrase derives a key like any other, and
/// policy about acceptable passphrases belongs to the caller.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<DerivedKey, CryptoError> {
    if salt.len() != SALT_LEN {
        return Err(CryptoError::Derivation(format!(
            "expected a {}-byte salt, got {} bytes",
            SALT_LEN,
            salt.len()
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);

    Ok(DerivedKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; SALT_LEN] = [7u8; SALT_LEN];

    #[test]
    fn test_derive_key_length() {
        let key = derive_key("test_passphrase", &SALT).unwrap();
        assert_eq!(key.as_bytes().len(), 32);
    }

    #[test]
    fn test_same_inputs_same_key() {
        let key1 = derive_key("test_passphrase", &SALT).unwrap();
        let key2 = derive_key("test_passphrase", &SALT).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let key1 = derive_key("passphrase1", &SALT).unwrap();
        let key2 = derive_key("passphrase2", &SALT).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let other_salt = [8u8; SALT_LEN];
        let key1 = derive_key("same_passphrase", &SALT).unwrap();
        let key2 = derive_key("same_passphrase", &other_salt).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_is_accepted() {
        // Rejecting empty passphrases is caller-side policy, not ours.
        let key = derive_key("", &SALT).unwrap();
        assert_eq!(key.as_bytes().len(), 32);
    }

    #[test]
    fn test_short_salt_rejected() {
        let result = derive_key("test_passphrase", &[1u8; 8]);
        assert!(matches!(result, Err(CryptoError::Derivation(_))));
    }

    #[test]
    fn test_long_salt_rejected() {
        let result = derive_key("test_passphrase", &[1u8; 32]);
        assert!(matches!(result, Err(CryptoError::Derivation(_))));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = derive_key("test_passphrase", &SALT).unwrap();
        assert_eq!(format!("{:?}", key), "DerivedKey { .. }");
    }
}
