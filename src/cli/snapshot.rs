//! Snapshot CLI commands
//!
//! Commands operate on a local JSON snapshot of the store's transaction
//! list: encrypt everything plaintext, decrypt everything encrypted, verify
//! a passphrase, or report counts. File work is separated from prompting so
//! the operations can be exercised directly in tests.

use std::path::Path;

use crate::crypto::{verify_passphrase, OsCrypto, SecureString, TransactionCrypto};
use crate::error::{BudgetError, BudgetResult};
use crate::models::Transaction;
use crate::storage::{read_json_required, write_json_atomic};

/// Outcome of encrypting a snapshot
#[derive(Debug, PartialEq, Eq)]
pub struct EncryptReport {
    /// Records newly encrypted by this run
    pub encrypted: usize,
    /// Records that were already encrypted and left untouched
    pub skipped: usize,
}

/// Outcome of decrypting a snapshot
#[derive(Debug, PartialEq, Eq)]
pub struct DecryptReport {
    /// Records successfully decrypted
    pub decrypted: usize,
    /// Records that came back error-flagged
    pub failed: usize,
    /// Records that were already plaintext
    pub passed_through: usize,
}

/// Counts describing a snapshot's encryption state
#[derive(Debug, PartialEq, Eq)]
pub struct SnapshotStatus {
    pub total: usize,
    pub encrypted: usize,
    pub plaintext: usize,
    pub flagged: usize,
}

/// Encrypt every plaintext record in a snapshot
///
/// Already-encrypted records are left as they are; their envelopes are
/// immutable and only a decrypt/re-encrypt cycle replaces them.
pub fn encrypt_snapshot(
    input: &Path,
    output: &Path,
    passphrase: &str,
) -> BudgetResult<EncryptReport> {
    let records: Vec<Transaction> = read_json_required(input)?;
    let crypto = TransactionCrypto::new();

    let mut report = EncryptReport {
        encrypted: 0,
        skipped: 0,
    };
    let mut out = Vec::with_capacity(records.len());
    for record in &records {
        if record.encrypted {
            report.skipped += 1;
            out.push(record.clone());
        } else {
            out.push(crypto.encrypt_transaction(record, passphrase)?);
            report.encrypted += 1;
        }
    }

    write_json_atomic(output, &out)?;
    Ok(report)
}

/// Decrypt every encrypted record in a snapshot
///
/// The passphrase is verified against the first encrypted record before the
/// batch runs, so a simple typo fails fast instead of producing a snapshot
/// full of flagged records. Individual corrupted envelopes still surface as
/// error-flagged entries in the output.
pub fn decrypt_snapshot(
    input: &Path,
    output: &Path,
    passphrase: &str,
) -> BudgetResult<DecryptReport> {
    let records: Vec<Transaction> = read_json_required(input)?;

    let reference = records
        .iter()
        .filter(|r| r.encrypted)
        .find_map(|r| r.encrypted_data.as_ref());
    match reference {
        None => {
            // Nothing encrypted; copy through unchanged.
            write_json_atomic(output, &records)?;
            return Ok(DecryptReport {
                decrypted: 0,
                failed: 0,
                passed_through: records.len(),
            });
        }
        Some(envelope) => {
            if !verify_passphrase(&OsCrypto, passphrase, envelope) {
                return Err(BudgetError::Passphrase(
                    "incorrect passphrase for this snapshot".to_string(),
                ));
            }
        }
    }

    let crypto = TransactionCrypto::new();
    let passed_through = records.iter().filter(|r| !r.encrypted).count();
    let out = crypto.decrypt_all(&records, passphrase);

    let failed = out.iter().filter(|r| r.error).count();
    let report = DecryptReport {
        decrypted: out.len() - failed - passed_through,
        failed,
        passed_through,
    };

    write_json_atomic(output, &out)?;
    Ok(report)
}

/// Check a passphrase against the first encrypted record of a snapshot
pub fn verify_snapshot(input: &Path, passphrase: &str) -> BudgetResult<bool> {
    let records: Vec<Transaction> = read_json_required(input)?;

    let reference = records
        .iter()
        .filter(|r| r.encrypted)
        .find_map(|r| r.encrypted_data.as_ref())
        .ok_or_else(|| {
            BudgetError::Passphrase("snapshot has no encrypted records to verify against".to_string())
        })?;

    Ok(verify_passphrase(&OsCrypto, passphrase, reference))
}

/// Count the encryption states in a snapshot
pub fn snapshot_status(input: &Path) -> BudgetResult<SnapshotStatus> {
    let records: Vec<Transaction> = read_json_required(input)?;

    Ok(SnapshotStatus {
        total: records.len(),
        encrypted: records.iter().filter(|r| r.encrypted).count(),
        plaintext: records.iter().filter(|r| !r.encrypted).count(),
        flagged: records.iter().filter(|r| r.error).count(),
    })
}

/// Handle the `encrypt` command
pub fn handle_encrypt(input: &Path, output: Option<&Path>) -> BudgetResult<()> {
    let passphrase = prompt_new_passphrase()?;
    let output = output.unwrap_or(input);

    let report = encrypt_snapshot(input, output, &passphrase)?;
    println!(
        "Encrypted {} record(s), {} already encrypted.",
        report.encrypted, report.skipped
    );
    println!("Wrote {}", output.display());
    Ok(())
}

/// Handle the `decrypt` command
pub fn handle_decrypt(input: &Path, output: Option<&Path>) -> BudgetResult<()> {
    let passphrase = prompt_passphrase("Enter passphrase: ")?;
    let output = output.unwrap_or(input);

    let report = decrypt_snapshot(input, output, &passphrase)?;
    println!(
        "Decrypted {} record(s), {} already plaintext.",
        report.decrypted, report.passed_through
    );
    if report.failed > 0 {
        println!(
            "WARNING: {} record(s) could not be decrypted and are marked with an error flag.",
            report.failed
        );
    }
    println!("Wrote {}", output.display());
    Ok(())
}

/// Handle the `verify` command
pub fn handle_verify(input: &Path) -> BudgetResult<()> {
    let passphrase = prompt_passphrase("Enter passphrase: ")?;

    if verify_snapshot(input, &passphrase)? {
        println!("Passphrase is correct!");
        Ok(())
    } else {
        println!("Passphrase is incorrect.");
        Err(BudgetError::Passphrase("invalid passphrase".to_string()))
    }
}

/// Handle the `status` command
pub fn handle_status(input: &Path) -> BudgetResult<()> {
    let status = snapshot_status(input)?;

    println!("Snapshot: {}", input.display());
    println!("  Total records:     {}", status.total);
    println!("  Encrypted:         {}", status.encrypted);
    println!("  Plaintext:         {}", status.plaintext);
    if status.flagged > 0 {
        println!("  Error-flagged:     {}", status.flagged);
    }
    Ok(())
}

/// Prompt for a new passphrase with confirmation
fn prompt_new_passphrase() -> BudgetResult<SecureString> {
    loop {
        let pass1 = prompt_passphrase("Enter new passphrase: ")?;

        if pass1.len() < 8 {
            println!("Passphrase must be at least 8 characters. Please try again.");
            continue;
        }

        let pass2 = prompt_passphrase("Confirm passphrase: ")?;

        if pass1.as_str() != pass2.as_str() {
            println!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a passphrase (hidden input)
fn prompt_passphrase(prompt: &str) -> BudgetResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| BudgetError::Passphrase(format!("failed to read passphrase: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    const PASSPHRASE: &str = "correct horse battery staple";

    fn sample_records() -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        (0..3)
            .map(|i| {
                let mut txn = Transaction::new("expense", date, 1_740_787_200_000 + i);
                txn.amount = Some(10.0 + i as f64);
                txn.vendor = Some(format!("Vendor {}", i));
                txn.payer = Some("Alex".to_string());
                txn
            })
            .collect()
    }

    #[test]
    fn test_encrypt_then_decrypt_snapshot() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain.json");
        let locked = dir.path().join("locked.json");
        let unlocked = dir.path().join("unlocked.json");

        write_json_atomic(&plain, &sample_records()).unwrap();

        let report = encrypt_snapshot(&plain, &locked, PASSPHRASE).unwrap();
        assert_eq!(
            report,
            EncryptReport {
                encrypted: 3,
                skipped: 0
            }
        );

        let locked_records: Vec<Transaction> = read_json_required(&locked).unwrap();
        assert!(locked_records.iter().all(|r| r.encrypted));
        assert!(locked_records.iter().all(|r| r.amount.is_none()));

        let report = decrypt_snapshot(&locked, &unlocked, PASSPHRASE).unwrap();
        assert_eq!(report.decrypted, 3);
        assert_eq!(report.failed, 0);

        let restored: Vec<Transaction> = read_json_required(&unlocked).unwrap();
        assert_eq!(restored[0].vendor.as_deref(), Some("Vendor 0"));
        assert_eq!(restored[2].amount, Some(12.0));
    }

    #[test]
    fn test_encrypt_skips_already_encrypted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        write_json_atomic(&path, &sample_records()).unwrap();
        encrypt_snapshot(&path, &path, PASSPHRASE).unwrap();

        let report = encrypt_snapshot(&path, &path, PASSPHRASE).unwrap();
        assert_eq!(
            report,
            EncryptReport {
                encrypted: 0,
                skipped: 3
            }
        );
    }

    #[test]
    fn test_decrypt_rejects_wrong_passphrase_up_front() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let out = dir.path().join("out.json");

        write_json_atomic(&path, &sample_records()).unwrap();
        encrypt_snapshot(&path, &path, PASSPHRASE).unwrap();

        let result = decrypt_snapshot(&path, &out, "wrong");
        assert!(matches!(result, Err(BudgetError::Passphrase(_))));
        // The output file is never written on a rejected passphrase.
        assert!(!out.exists());
    }

    #[test]
    fn test_decrypt_passes_plaintext_snapshot_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let out = dir.path().join("out.json");

        write_json_atomic(&path, &sample_records()).unwrap();

        let report = decrypt_snapshot(&path, &out, PASSPHRASE).unwrap();
        assert_eq!(report.passed_through, 3);
        assert_eq!(report.decrypted, 0);
    }

    #[test]
    fn test_verify_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        write_json_atomic(&path, &sample_records()).unwrap();
        encrypt_snapshot(&path, &path, PASSPHRASE).unwrap();

        assert!(verify_snapshot(&path, PASSPHRASE).unwrap());
        assert!(!verify_snapshot(&path, "wrong").unwrap());
    }

    #[test]
    fn test_verify_needs_an_encrypted_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        write_json_atomic(&path, &sample_records()).unwrap();

        let result = verify_snapshot(&path, PASSPHRASE);
        assert!(matches!(result, Err(BudgetError::Passphrase(_))));
    }

    #[test]
    fn test_status_counts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let mut records = sample_records();
        let crypto = TransactionCrypto::new();
        records[0] = crypto.encrypt_transaction(&records[0], PASSPHRASE).unwrap();
        write_json_atomic(&path, &records).unwrap();

        let status = snapshot_status(&path).unwrap();
        assert_eq!(
            status,
            SnapshotStatus {
                total: 3,
                encrypted: 1,
                plaintext: 2,
                flagged: 0
            }
        );
    }
}
