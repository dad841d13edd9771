//! Cryptographic core for BudgetDuo
//!
//! Implements the per-record authenticated encryption layer: PBKDF2 key
//! derivation from the shared passphrase, AES-256-GCM sealing of the
//! sensitive field subset, base64 armoring for the text-only store, and
//! passphrase verification.
//!
//! The store is readable by anyone who learns the session code, so these
//! envelopes are the only thing standing between a record's sensitive
//! fields and the world. Transport security is the store's problem;
//! metadata left in plaintext (`type`, `date`, `timestamp`) is a deliberate
//! querying tradeoff.

pub mod armor;
pub mod encryption;
pub mod key_derivation;
pub mod payload;
pub mod provider;
pub mod random;
pub mod record;
pub mod secure_memory;
pub mod verify;

pub use encryption::{open, seal, Envelope, NONCE_LEN};
pub use key_derivation::{derive_key, DerivedKey, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
pub use provider::{CryptoProvider, OsCrypto};
pub use record::TransactionCrypto;
pub use secure_memory::SecureString;
pub use verify::{verification_envelope, verify_passphrase};
