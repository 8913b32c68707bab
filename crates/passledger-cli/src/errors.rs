//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use passledger_core::VaultError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (vault, entry, group)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong master password, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Vault contents failed an integrity or decryption check
    IntegrityFailed { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } | CliError::IntegrityFailed { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and optional hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create an IntegrityFailed error with message and hint.
    pub fn integrity_failed(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::IntegrityFailed {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed { .. } => exit_codes::INTEGRITY_FAILED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

impl From<VaultError> for CliError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::EntryNotFound(id) => CliError::not_found(
                format!("Entry {} not found.", id),
                "Hint: Run `passledger list` to see entry IDs.",
            ),
            VaultError::GroupNotFound(name) => CliError::not_found(
                format!("Group \"{}\" not found.", name),
                "Hint: Run `passledger group list` to see groups.",
            ),
            VaultError::AuthenticationFailed => CliError::auth_failed("Incorrect master password."),
            VaultError::DuplicateGroup(name) => {
                CliError::invalid_input(format!("Group \"{}\" already exists.", name))
            }
            VaultError::InvalidInput(message) => CliError::invalid_input(message),
            err @ (VaultError::CorruptCiphertext(_) | VaultError::MetadataUnreadable(_)) => {
                CliError::integrity_failed(
                    err.to_string(),
                    "Hint: Restore from a backup made with `passledger backup`.",
                )
            }
            err @ (VaultError::InvalidKeySize(_) | VaultError::Storage(_)) => {
                CliError::integrity_failed(
                    err.to_string(),
                    "Hint: Check that the vault file is readable and the disk is not full.",
                )
            }
        }
    }
}

/// Exit code for an error returned from a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<VaultError>() {
        Some(VaultError::EntryNotFound(_) | VaultError::GroupNotFound(_)) => exit_codes::NOT_FOUND,
        Some(VaultError::InvalidInput(_) | VaultError::DuplicateGroup(_)) => {
            exit_codes::INVALID_INPUT
        }
        Some(VaultError::AuthenticationFailed) => exit_codes::AUTH_FAILED,
        Some(VaultError::CorruptCiphertext(_) | VaultError::MetadataUnreadable(_)) => {
            exit_codes::INTEGRITY_FAILED
        }
        _ => exit_codes::GENERAL,
    }
}
