//! CLI command handlers
//!
//! Bridges clap argument parsing with the encryption core and snapshot
//! storage.

pub mod snapshot;

pub use snapshot::{handle_decrypt, handle_encrypt, handle_status, handle_verify};
