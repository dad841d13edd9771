//! AES-256-GCM authenticated encryption and the stored envelope
//!
//! `seal` and `open` provide combined confidentiality and integrity. `open`
//! fails closed: a wrong key, a wrong nonce, or a single flipped bit all
//! yield the same opaque `Authentication` error and no
//! partial plaintext.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

use super::armor;
use super::key_derivation::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

/// The encrypted envelope persisted alongside a record
///
/// All three components are base64 text because the synchronization store
/// only holds text. An envelope is assembled once, at encryption time, and
/// never mutated; re-encrypting a record produces a whole new envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// The AEAD-sealed payload (ciphertext plus authentication tag)
    #[serde(rename = "encrypted")]
    pub ciphertext: String,

    /// The 16-byte key derivation salt
    pub salt: String,

    /// The 12-byte nonce. Stored under the name the original web client
    /// used for it.
    pub iv: String,
}

impl Envelope {
    /// Assemble an envelope from raw sealed bytes, salt, and nonce
    pub fn from_parts(sealed: &[u8], salt: &[u8], nonce: &[u8]) -> Self {
        Self {
            ciphertext: armor::encode(sealed),
            salt: armor::encode(salt),
            iv: armor::encode(nonce),
        }
    }

    /// Decode the sealed payload from base64
    pub fn decode_ciphertext(&self) -> Result<Vec<u8>, CryptoError> {
        armor::decode(&self.ciphertext)
    }

    /// Decode the salt from base64
    pub fn decode_salt(&self) -> Result<Vec<u8>, CryptoError> {
        armor::decode(&self.salt)
    }

    /// Decode the nonce from base64, checking its length
    pub fn decode_nonce(&self) -> Result<[u8; NONCE_LEN], CryptoError> {
        let bytes = armor::decode(&self.iv)?;
        bytes.try_into().map_err(|bytes: Vec<u8>| {
            CryptoError::Encoding(format!(
                "expected a {}-byte nonce, got {} bytes",
                NONCE_LEN,
                bytes.len()
            ))
        })
    }
}

/// Seal a plaintext payload under (key, nonce)
///
/// The output interleaves ciphertext and authentication tag the way
/// AES-GCM produces them; callers treat it as opaque bytes.
pub fn seal(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| CryptoError::Seal("AEAD seal failed".to_string()))
}

/// Open a sealed payload under (key, nonce)
///
/// Returns the plaintext only if the authentication tag verifies. The error
/// deliberately does not say which input was wrong.
pub fn open(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    sealed: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CryptoError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::{derive_key, SALT_LEN};

    fn test_key() -> DerivedKey {
        derive_key("test_passphrase", &[7u8; SALT_LEN]).unwrap()
    }

    fn test_nonce() -> [u8; NONCE_LEN] {
        [9u8; NONCE_LEN]
    }

    #[test]
    fn test_seal_open_round_trip() {
        let key = test_key();
        let nonce = test_nonce();
        let plaintext = b"Hello, World!";

        let sealed = seal(&key, &nonce, plaintext).unwrap();
        let opened = open(&key, &nonce, &sealed).unwrap();

        assert_eq!(plaintext, opened.as_slice());
    }

    #[test]
    fn test_sealed_is_larger_than_plaintext() {
        // AES-GCM appends a 16-byte tag.
        let sealed = seal(&test_key(), &test_nonce(), b"payload").unwrap();
        assert_eq!(sealed.len(), b"payload".len() + 16);
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = test_key();
        let other_key = derive_key("different_passphrase", &[7u8; SALT_LEN]).unwrap();
        let nonce = test_nonce();

        let sealed = seal(&key, &nonce, b"payload").unwrap();
        let result = open(&other_key, &nonce, &sealed);
        assert!(matches!(result, Err(CryptoError::Authentication)));
    }

    #[test]
    fn test_wrong_nonce_fails() {
        let key = test_key();
        let sealed = seal(&key, &test_nonce(), b"payload").unwrap();

        let result = open(&key, &[10u8; NONCE_LEN], &sealed);
        assert!(matches!(result, Err(CryptoError::Authentication)));
    }

    #[test]
    fn test_any_flipped_byte_fails() {
        let key = test_key();
        let nonce = test_nonce();
        let sealed = seal(&key, &nonce, b"payload").unwrap();

        for i in 0..sealed.len() {
            let mut tampered = sealed.clone();
            tampered[i] ^= 0x01;
            let result = open(&key, &nonce, &tampered);
            assert!(
                matches!(result, Err(CryptoError::Authentication)),
                "byte {} survived tampering",
                i
            );
        }
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();
        let nonce = test_nonce();

        let sealed = seal(&key, &nonce, b"").unwrap();
        let opened = open(&key, &nonce, &sealed).unwrap();
        assert!(opened.is_empty());
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = Envelope::from_parts(&[1, 2, 3], &[4u8; 16], &[5u8; NONCE_LEN]);
        assert_eq!(envelope.decode_ciphertext().unwrap(), vec![1, 2, 3]);
        assert_eq!(envelope.decode_salt().unwrap(), vec![4u8; 16]);
        assert_eq!(envelope.decode_nonce().unwrap(), [5u8; NONCE_LEN]);
    }

    #[test]
    fn test_envelope_rejects_short_nonce() {
        let envelope = Envelope::from_parts(&[1, 2, 3], &[4u8; 16], &[5u8; 4]);
        assert!(matches!(
            envelope.decode_nonce(),
            Err(CryptoError::Encoding(_))
        ));
    }

    #[test]
    fn test_envelope_wire_names() {
        let envelope = Envelope::from_parts(&[1], &[2u8; 16], &[3u8; NONCE_LEN]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("encrypted").is_some());
        assert!(json.get("salt").is_some());
        assert!(json.get("iv").is_some());
    }
}
