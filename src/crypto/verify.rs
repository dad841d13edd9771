//! Passphrase verification
//!
//! A typed passphrase is checked once, at session start, against a known
//! envelope before it is trusted for a whole batch of records. Verification
//! only asks whether the envelope opens: the reference can be any
//! production envelope, or a dedicated sentinel envelope created for a
//! session that has no encrypted records yet.
//!
//! Accepted tradeoff, inherited from the source system: whoever captures one
//! envelope can brute-force the shared passphrase offline against it using
//! nothing but public primitives. The iteration count of the key derivation
//! is the only brake on that.

use crate::error::CryptoError;

use super::encryption::Envelope;
use super::provider::CryptoProvider;

/// Fixed plaintext sealed into a session's verification envelope
const VERIFICATION_SENTINEL: &[u8] = b"budgetduo_verify";

/// Check a candidate passphrase against a reference envelope
///
/// Returns true iff the envelope opens under a key derived from the
/// candidate. Every failure mode (bad base64, wrong length, tag mismatch)
/// collapses to `false`; nothing propagates.
pub fn verify_passphrase<P: CryptoProvider>(
    provider: &P,
    passphrase: &str,
    reference: &Envelope,
) -> bool {
    try_open(provider, passphrase, reference).is_ok()
}

/// Create a reference envelope for a new session by sealing a fixed sentinel
///
/// Lets a session verify later passphrase entries before the first real
/// record has been encrypted.
pub fn verification_envelope<P: CryptoProvider>(
    provider: &P,
    passphrase: &str,
) -> Result<Envelope, CryptoError> {
    let salt = provider.generate_salt();
    let key = provider.derive_key(passphrase, &salt)?;
    let nonce = provider.generate_nonce();
    let sealed = provider.seal(&key, &nonce, VERIFICATION_SENTINEL)?;
    Ok(Envelope::from_parts(&sealed, &salt, &nonce))
}

fn try_open<P: CryptoProvider>(
    provider: &P,
    passphrase: &str,
    reference: &Envelope,
) -> Result<(), CryptoError> {
    let salt = reference.decode_salt()?;
    let key = provider.derive_key(passphrase, &salt)?;
    let nonce = reference.decode_nonce()?;
    let sealed = reference.decode_ciphertext()?;
    provider.open(&key, &nonce, &sealed)?;
    Ok(())
}
