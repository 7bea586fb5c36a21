//! Vault module — the entry collection, its encrypted blob form, and
//! the sync state machine.
//!
//! This module provides:
//! - The `Entry` type and canonical JSON (de)serialization (`entry`)
//! - `VaultBlob` with base64 wire conversions (`blob`)
//! - The `VaultSync` existence/save state machine (`sync`)

pub mod blob;
pub mod entry;
pub mod sync;

// Re-export the most commonly used items.
pub use blob::{VaultBlob, WireVault};
pub use entry::{deserialize_entries, serialize_entries, Entry};
pub use sync::{SaveOp, SyncState, VaultSync};
