//! Snapshot file storage
//!
//! The realtime synchronization store itself is external; the CLI works on
//! local JSON snapshots of its transaction list.

pub mod file_io;

pub use file_io::{read_json_required, write_json_atomic};
