//! Master-password key derivation and verification.
//!
//! The derivation chain runs in a fixed order:
//! 1. `HMAC(password, password)` decouples the raw password bytes from the
//!    stretching step
//! 2. PBKDF2-HMAC-SHA-256 stretches that value with the stored salt and
//!    iteration count
//! 3. A counter-mode KDF labels the stretched secret for field encryption
//!
//! The iteration count is fixed when a vault is created and reused for every
//! later authentication against that vault.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::kdf::{counter_kdf, hmac_sha256, HMAC_LENGTH};
use crate::error::{Result, VaultError};

/// Length of the derived key in bytes (AES-256).
pub const KEY_LENGTH: usize = 32;

/// Length of a freshly generated salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Usage label for the field-encryption key.
const FIELD_KEY_LABEL: &[u8] = b"passledger/field-encryption";

/// Message authenticated by the stored verifier.
const VERIFIER_MESSAGE: &[u8] = b"verifier";

/// A key derived from the master password.
///
/// The bytes are owned exclusively by this value and zeroized when it is
/// dropped. Not `Clone`: one open vault owns one key.
#[derive(ZeroizeOnDrop)]
pub struct VaultKey {
    key: [u8; KEY_LENGTH],
}

impl VaultKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the field-encryption key from a master password.
///
/// # Arguments
///
/// * `password` - The master password bytes
/// * `salt` - Salt stored in the vault metadata (at least 16 bytes)
/// * `iterations` - PBKDF2 iteration count stored in the vault metadata
///
/// # Security
///
/// - Same password + salt + iterations always produces the same key
/// - Intermediate values are zeroized before returning
///
/// # Examples
///
/// ```
/// use passledger_core::crypto::derive_key;
///
/// let salt = b"unique-salt-per-vault";
/// let key = derive_key(b"master password", salt, 1000).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> Result<VaultKey> {
    if salt.len() < SALT_LENGTH {
        return Err(VaultError::InvalidInput(format!(
            "Salt must be at least {} bytes",
            SALT_LENGTH
        )));
    }
    if iterations == 0 {
        return Err(VaultError::InvalidInput(
            "Iteration count must be positive".to_string(),
        ));
    }

    let intermediate = Zeroizing::new(hmac_sha256(password, password)?);

    let mut stretched = Zeroizing::new([0u8; HMAC_LENGTH]);
    pbkdf2::pbkdf2_hmac::<Sha256>(&intermediate[..], salt, iterations, &mut stretched[..]);

    let derived = counter_kdf(&stretched[..], FIELD_KEY_LABEL, b"", KEY_LENGTH)?;
    let mut key_bytes = [0u8; KEY_LENGTH];
    key_bytes.copy_from_slice(&derived);
    let key = VaultKey::from_bytes(key_bytes);
    key_bytes.zeroize();

    Ok(key)
}

/// Compute the verifier stored in the vault metadata: `HMAC(key, "verifier")`.
pub fn compute_verifier(key: &VaultKey) -> Result<[u8; HMAC_LENGTH]> {
    hmac_sha256(key.as_bytes(), VERIFIER_MESSAGE)
}

/// Check a candidate key against a stored verifier.
///
/// Returns `false` without comparing when the lengths differ; otherwise the
/// comparison runs in constant time.
pub fn verify_password(candidate: &VaultKey, stored_verifier: &[u8]) -> Result<bool> {
    let expected = compute_verifier(candidate)?;
    Ok(constant_time_eq(&expected, stored_verifier))
}

/// Generate a fresh random salt (call once per vault; store in metadata).
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    salt
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITERATIONS: u32 = 1000;
    const SALT: &[u8] = b"fixed-salt-1234567890";

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key(b"test-password", SALT, ITERATIONS).unwrap();
        let key2 = derive_key(b"test-password", SALT, ITERATIONS).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key(b"test-password", b"salt1-1234567890123456", ITERATIONS).unwrap();
        let key2 = derive_key(b"test-password", b"salt2-1234567890123456", ITERATIONS).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_iterations_different_key() {
        let key1 = derive_key(b"test-password", SALT, ITERATIONS).unwrap();
        let key2 = derive_key(b"test-password", SALT, ITERATIONS + 1).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_short_salt_rejected() {
        let result = derive_key(b"test-password", b"short", ITERATIONS);
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = derive_key(b"test-password", SALT, 0);
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn test_verifier_accepts_correct_password() {
        let key = derive_key(b"pw", SALT, ITERATIONS).unwrap();
        let verifier = compute_verifier(&key).unwrap();

        let candidate = derive_key(b"pw", SALT, ITERATIONS).unwrap();
        assert!(verify_password(&candidate, &verifier).unwrap());
    }

    #[test]
    fn test_verifier_rejects_wrong_password() {
        let key = derive_key(b"pw", SALT, ITERATIONS).unwrap();
        let verifier = compute_verifier(&key).unwrap();

        let candidate = derive_key(b"pw2", SALT, ITERATIONS).unwrap();
        assert!(!verify_password(&candidate, &verifier).unwrap());
    }

    #[test]
    fn test_verifier_length_mismatch_is_false() {
        let key = derive_key(b"pw", SALT, ITERATIONS).unwrap();
        let verifier = compute_verifier(&key).unwrap();

        assert!(!verify_password(&key, &verifier[..31]).unwrap());
        assert!(!verify_password(&key, &[]).unwrap());
    }

    #[test]
    fn test_generated_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_vault_key_debug_redacts() {
        let key = derive_key(b"test-password", SALT, ITERATIONS).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
