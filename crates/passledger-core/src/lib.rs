//! # PassLedger Core
//!
//! Core library for PassLedger - a local, single-user encrypted credential
//! vault.
//!
//! This crate provides the vault engine independent of any user interface.
//!
//! ## Architecture
//!
//! - **crypto**: Master-password key derivation and per-field AES-256-CBC envelopes
//! - **storage**: `VaultStore` trait and the SQLite implementation
//! - **vault**: The `Vault` session facade (open/create, entry and group operations)
//! - **filter**: Pure in-memory filtering of decrypted entries

pub mod crypto;
pub mod error;
pub mod filter;
pub mod fs;
pub mod storage;
pub mod vault;

pub use error::{Result, VaultError};
pub use filter::{
    filter_by_group, filter_entries, FilterSettings, GroupSelection, SearchField, SearchFields,
};
pub use storage::{SqliteStore, VaultStore};
pub use vault::{
    Entry, IntegrityReport, NewEntry, Vault, VaultOptions, DEFAULT_ITERATIONS,
    RESERVED_GROUP_NAME,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
