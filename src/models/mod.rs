//! Core data models for BudgetDuo

pub mod transaction;

pub use transaction::{SensitiveFields, Transaction, DECRYPT_ERROR_VENDOR, ENCRYPTED_VENDOR};
