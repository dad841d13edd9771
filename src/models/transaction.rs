//! Transaction record model
//!
//! Mirrors the record shape held by the shared synchronization store. The
//! public metadata (`type`, `date`, `timestamp`) stays in plaintext so both
//! users can sort and filter without decrypting; everything else is the
//! sensitive subset that gets sealed into the envelope.
//!
//! The set of field names is identical whether a record is encrypted or
//! plain: sensitive fields are `Option`s that hold placeholders, never
//! keys that appear and disappear with encryption state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::crypto::Envelope;

/// Display placeholder for the vendor field of an encrypted record
pub const ENCRYPTED_VENDOR: &str = "[Encrypted]";

/// Display sentinel for the vendor field of a record that failed to decrypt
pub const DECRYPT_ERROR_VENDOR: &str = "[Decryption error]";

/// The confidential subset of a transaction
///
/// Serialized in declaration order, which keeps the encrypted payload
/// byte-stable for identical field values. Missing keys decode as `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitiveFields {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub beneficiary: Option<String>,
    #[serde(default)]
    pub payer: Option<String>,
    #[serde(default)]
    pub user_share: Option<f64>,
    #[serde(default)]
    pub partner_share: Option<f64>,
    #[serde(default)]
    pub is_shared: Option<bool>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
}

/// A shared-budget transaction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Record type, e.g. "expense" (plaintext metadata)
    #[serde(rename = "type")]
    pub kind: String,

    /// Transaction date (plaintext metadata)
    pub date: NaiveDate,

    /// Creation time in milliseconds since the epoch (plaintext metadata)
    pub timestamp: i64,

    /// Whether the sensitive fields are sealed into `encrypted_data`
    #[serde(default)]
    pub encrypted: bool,

    /// Set when decryption failed and the record carries sentinels instead
    /// of real values
    #[serde(default)]
    pub error: bool,

    /// The envelope holding the sealed sensitive fields
    #[serde(default)]
    pub encrypted_data: Option<Envelope>,

    // The store strips null values, so any of these keys may be absent in
    // a fetched document; they always serialize back out as null.
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub beneficiary: Option<String>,
    #[serde(default)]
    pub payer: Option<String>,
    #[serde(default)]
    pub user_share: Option<f64>,
    #[serde(default)]
    pub partner_share: Option<f64>,
    #[serde(default)]
    pub is_shared: Option<bool>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
}

impl Transaction {
    /// Create a new plaintext transaction with empty sensitive fields
    pub fn new(kind: impl Into<String>, date: NaiveDate, timestamp: i64) -> Self {
        Self {
            kind: kind.into(),
            date,
            timestamp,
            encrypted: false,
            error: false,
            encrypted_data: None,
            amount: None,
            vendor: None,
            category: None,
            beneficiary: None,
            payer: None,
            user_share: None,
            partner_share: None,
            is_shared: None,
            photos: None,
        }
    }

    /// Extract the confidential subset of this record
    pub fn sensitive_fields(&self) -> SensitiveFields {
        SensitiveFields {
            amount: self.amount,
            vendor: self.vendor.clone(),
            category: self.category.clone(),
            beneficiary: self.beneficiary.clone(),
            payer: self.payer.clone(),
            user_share: self.user_share,
            partner_share: self.partner_share,
            is_shared: self.is_shared,
            photos: self.photos.clone(),
        }
    }

    /// Build the encrypted form of this record
    ///
    /// Public metadata is copied unchanged, the sensitive fields are
    /// replaced by fixed placeholders, and the envelope is attached. `self`
    /// is left untouched.
    pub fn to_encrypted(&self, envelope: Envelope) -> Self {
        let mut record = Self::new(self.kind.clone(), self.date, self.timestamp);
        record.encrypted = true;
        record.encrypted_data = Some(envelope);
        record.vendor = Some(ENCRYPTED_VENDOR.to_string());
        record
    }

    /// Build the decrypted form of this record by merging the recovered
    /// sensitive fields back over the public metadata
    ///
    /// The envelope stays attached; it is immutable and only replaced by a
    /// full re-encryption.
    pub fn with_sensitive_fields(&self, fields: SensitiveFields) -> Self {
        let mut record = self.clone();
        record.encrypted = false;
        record.error = false;
        record.amount = fields.amount;
        record.vendor = fields.vendor;
        record.category = fields.category;
        record.beneficiary = fields.beneficiary;
        record.payer = fields.payer;
        record.user_share = fields.user_share;
        record.partner_share = fields.partner_share;
        record.is_shared = fields.is_shared;
        record.photos = fields.photos;
        record
    }

    /// Build the error-flagged form of this record
    ///
    /// Everything except the vendor sentinel keeps its encrypted
    /// placeholder value, so a failed record still renders in a list.
    pub fn with_decrypt_error(&self) -> Self {
        let mut record = self.clone();
        record.error = true;
        record.vendor = Some(DECRYPT_ERROR_VENDOR.to_string());
        record
    }
}
