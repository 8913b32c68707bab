//! Storage engine trait definition.
//!
//! The `VaultStore` trait is the seam between the vault facade and the
//! on-disk schema. Implementations must serialize writes against one open
//! vault and run each mutating call as a single transaction.

use std::path::Path;

use super::types::{EncryptedFields, EntryRow, Group, MetaRecord, NewRow};
use crate::error::Result;

/// Persistent store for one vault file.
///
/// Group names passed in are already validated by the caller; the store
/// only enforces uniqueness and existence.
pub trait VaultStore: Send + Sync {
    /// Create the `meta`, `groups` and `entries` tables if missing.
    fn create_schema(&self) -> Result<()>;

    /// Create the schema and write the singleton metadata row in one
    /// transaction. On failure neither is left behind.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Storage` if a metadata row already exists.
    fn initialize(&self, meta: &MetaRecord) -> Result<()>;

    /// Read and validate the singleton metadata row.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::MetadataUnreadable` if the row (or table) is
    /// missing, or any of its values is malformed.
    fn read_meta(&self) -> Result<MetaRecord>;

    // --- Entry operations ---

    /// Insert an entry, resolving `group` to an existing group or creating it.
    ///
    /// # Returns
    ///
    /// Returns the newly assigned entry id.
    fn insert_entry(&self, fields: &EncryptedFields, group: Option<&str>) -> Result<i64>;

    /// Insert several entries in one transaction, in order.
    ///
    /// Either every row is written or none is.
    fn insert_entries(&self, rows: &[NewRow<'_>]) -> Result<Vec<i64>>;

    /// Get one entry row by id.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(row))` if found, `Ok(None)` if not found.
    fn get_entry(&self, id: i64) -> Result<Option<EntryRow>>;

    /// List every entry row, ascending by id.
    fn list_entries(&self) -> Result<Vec<EntryRow>>;

    /// Replace all fields and the group of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::EntryNotFound` if `id` does not exist.
    fn update_entry(&self, id: i64, fields: &EncryptedFields, group: Option<&str>) -> Result<()>;

    /// Delete an entry by id.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::EntryNotFound` if `id` does not exist.
    fn delete_entry(&self, id: i64) -> Result<()>;

    // --- Group operations ---

    /// List all groups.
    fn list_groups(&self) -> Result<Vec<Group>>;

    /// Create a group.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::DuplicateGroup` if the name is already taken.
    fn insert_group(&self, name: &str) -> Result<i64>;

    /// Rename a group in place. Entries follow through the foreign key.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::GroupNotFound` if `old` does not exist, or
    /// `VaultError::DuplicateGroup` if `new` belongs to another group.
    fn rename_group(&self, old: &str, new: &str) -> Result<()>;

    /// Delete a group and every entry in it.
    ///
    /// # Returns
    ///
    /// Returns the number of entries removed with the group.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::GroupNotFound` if `name` does not exist.
    fn delete_group(&self, name: &str) -> Result<usize>;

    // --- Maintenance operations ---

    /// Check store integrity.
    ///
    /// Verifies:
    /// - Page-level consistency
    /// - Foreign key relationships
    /// - Exactly one metadata row
    fn check_integrity(&self) -> Result<()>;

    /// Write a consistent snapshot of the store to `dest`.
    fn backup_to(&self, dest: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_boxed_store(_store: Box<dyn VaultStore>) {}
    }
}
