//! Master password validation.
//!
//! Creation only rejects passwords that carry no characters at all. Short
//! passwords are allowed but produce a warning the CLI shows on `init`.

use crate::error::{Result, VaultError};

/// Below this many characters a password earns a strength warning.
const RECOMMENDED_PASSPHRASE_LENGTH: usize = 8;

/// Validate a master password before creating a vault.
///
/// # Returns
///
/// Returns `Ok(())` if usable, or `VaultError::InvalidInput` when the password
/// is empty or whitespace only.
///
/// # Examples
///
/// ```
/// use passledger_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("pw1").is_ok());
/// assert!(validate_passphrase("   ").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(VaultError::InvalidInput(
            "Master password cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Advisory message for weak (but accepted) master passwords.
pub fn passphrase_strength_warning(passphrase: &str) -> Option<String> {
    let chars = passphrase.chars().count();
    if chars < RECOMMENDED_PASSPHRASE_LENGTH {
        Some(format!(
            "Master password is only {} characters; at least {} is recommended",
            chars, RECOMMENDED_PASSPHRASE_LENGTH
        ))
    } else {
        None
    }
}
