//! Error types for PassLedger core operations.
//!
//! This module defines the error hierarchy for the vault engine. Errors are
//! descriptive at the core level; the CLI layer maps these to user-friendly
//! messages and exit codes.

use thiserror::Error;

/// Result type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Key handed to the cipher is not 32 bytes
    #[error("Invalid key size: expected 32 bytes, got {0}")]
    InvalidKeySize(usize),

    /// Envelope too short, not block-aligned, or padding invalid
    #[error("Corrupt ciphertext: {0}")]
    CorruptCiphertext(String),

    /// Verifier mismatch on open (wrong master password)
    #[error("Incorrect master password")]
    AuthenticationFailed,

    /// Meta row missing or malformed on an existing vault file
    #[error("Vault metadata unreadable: {0}")]
    MetadataUnreadable(String),

    /// Group name already exists
    #[error("Group already exists: {0}")]
    DuplicateGroup(String),

    /// Rename/delete target group does not exist
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// Entry id does not exist
    #[error("Entry not found: {0}")]
    EntryNotFound(i64),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Underlying file or SQLite read/write failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VaultError {
    /// Whether the session must be abandoned after this error.
    ///
    /// Callers must not keep operating on a vault handle once a fatal error
    /// has been returned from it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            VaultError::MetadataUnreadable(_) | VaultError::Storage(_)
        )
    }

    /// Whether the caller may simply retry (e.g. re-prompt for the password).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VaultError::AuthenticationFailed)
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for VaultError {
    fn from(err: rusqlite::Error) -> Self {
        VaultError::Storage(format!("SQLite error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(VaultError::Storage("disk full".to_string()).is_fatal());
        assert!(VaultError::MetadataUnreadable("no row".to_string()).is_fatal());
        assert!(!VaultError::AuthenticationFailed.is_fatal());
        assert!(!VaultError::GroupNotFound("Web".to_string()).is_fatal());
    }

    #[test]
    fn test_auth_failure_is_recoverable() {
        assert!(VaultError::AuthenticationFailed.is_recoverable());
        assert!(!VaultError::CorruptCiphertext("bad padding".to_string()).is_recoverable());
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let err: VaultError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, VaultError::Storage(_)));
    }
}
