//! BudgetDuo - per-record encryption core for a two-person shared budget
//!
//! Two users track shared and personal transactions through a realtime
//! store addressed by a shared session code. The store is readable by
//! anyone who learns the code, so each record's sensitive fields are
//! sealed client-side under a key derived from a shared passphrase; only
//! the metadata needed for sorting and filtering stays in plaintext.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Transaction record and its sensitive field subset
//! - `crypto`: Key derivation, AEAD sealing, envelope management,
//!   passphrase verification
//! - `storage`: JSON snapshot file I/O
//! - `cli`: Command handlers for the `budgetduo` binary

pub mod cli;
pub mod crypto;
pub mod error;
pub mod models;
pub mod storage;

pub use crypto::TransactionCrypto;
pub use error::{BudgetError, CryptoError};
pub use models::Transaction;
