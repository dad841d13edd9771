//! Per-record encryption orchestration
//!
//! `TransactionCrypto` ties the primitives together: extract the sensitive
//! subset, derive a key under a fresh salt, seal under a fresh nonce, and
//! assemble the base64 envelope, or run the whole pipeline in reverse.
//!
//! Salt and nonce are generated inside `encrypt_transaction` and are not
//! accepted from callers; a test that needs deterministic envelopes injects
//! its own `CryptoProvider` instead. That keeps nonce reuse structurally
//! impossible rather than merely discouraged.

use tracing::warn;

use crate::error::CryptoError;
use crate::models::Transaction;

use super::encryption::Envelope;
use super::payload;
use super::provider::{CryptoProvider, OsCrypto};

/// Stateless encryption service for transaction records
///
/// Holds no mutable state and caches no derived keys: every call re-derives
/// from the passphrase, so secrets live no longer than one operation.
/// Records are independent, so calls for different records can run in any
/// order or concurrently.
#[derive(Debug, Clone, Default)]
pub struct TransactionCrypto<P: CryptoProvider = OsCrypto> {
    provider: P,
}

impl TransactionCrypto<OsCrypto> {
    /// Create a service over the production primitives
    pub fn new() -> Self {
        Self { provider: OsCrypto }
    }
}

impl<P: CryptoProvider> TransactionCrypto<P> {
    /// Create a service over a custom provider (deterministic tests,
    /// alternative platforms)
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Encrypt one record under the shared passphrase
    ///
    /// Returns a new record with public metadata copied, sensitive fields
    /// replaced by placeholders, and a freshly assembled envelope attached.
    /// The input record is never mutated.
    pub fn encrypt_transaction(
        &self,
        txn: &Transaction,
        passphrase: &str,
    ) -> Result<Transaction, CryptoError> {
        let fields = txn.sensitive_fields();

        let salt = self.provider.generate_salt();
        let key = self.provider.derive_key(passphrase, &salt)?;
        let nonce = self.provider.generate_nonce();

        let plaintext = payload::encode(&fields)?;
        let sealed = self.provider.seal(&key, &nonce, &plaintext)?;

        let envelope = Envelope::from_parts(&sealed, &salt, &nonce);
        Ok(txn.to_encrypted(envelope))
    }

    /// Decrypt one record under the shared passphrase
    ///
    /// Plain records pass through unchanged. For encrypted records, any
    /// failure (wrong passphrase, tampering, malformed base64 or payload)
    /// produces an error-flagged record instead of propagating, so one bad
    /// envelope never hides the rest of a batch. This is the crate's single
    /// intentional recovery point; the failure is logged, not discarded.
    pub fn decrypt_transaction(&self, txn: &Transaction, passphrase: &str) -> Transaction {
        if !txn.encrypted {
            return txn.clone();
        }

        match self.try_decrypt(txn, passphrase) {
            Ok(decrypted) => decrypted,
            Err(err) => {
                warn!(%err, date = %txn.date, kind = %txn.kind, "failed to decrypt record, flagging it");
                txn.with_decrypt_error()
            }
        }
    }

    /// Decrypt a whole snapshot of records
    ///
    /// Records are independent computations over immutable inputs; failures
    /// surface as error-flagged entries in the result, never as an abort.
    pub fn decrypt_all(&self, txns: &[Transaction], passphrase: &str) -> Vec<Transaction> {
        txns.iter()
            .map(|txn| self.decrypt_transaction(txn, passphrase))
            .collect()
    }

    fn try_decrypt(&self, txn: &Transaction, passphrase: &str) -> Result<Transaction, CryptoError> {
        let envelope = txn
            .encrypted_data
            .as_ref()
            .ok_or_else(|| CryptoError::Decode("encrypted record has no envelope".to_string()))?;

        let salt = envelope.decode_salt()?;
        let key = self.provider.derive_key(passphrase, &salt)?;
        let nonce = envelope.decode_nonce()?;
        let sealed = envelope.decode_ciphertext()?;

        let plaintext = self.provider.open(&key, &nonce, &sealed)?;
        let fields = payload::decode(&plaintext)?;

        Ok(txn.with_sensitive_fields(fields))
    }
}
