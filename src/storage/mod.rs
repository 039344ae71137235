//! Local storage layer for Nexora
//!
//! All financial data lives on the server. Locally we only persist the
//! session (token pair and storage mode) and settings, using JSON files with
//! atomic writes.

pub mod file_io;
pub mod kv;

pub use file_io::{read_json, remove_if_exists, write_json_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
