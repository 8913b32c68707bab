//! Cryptographic operations for PassLedger.
//!
//! This module provides key derivation and per-field encryption built on
//! well-audited RustCrypto primitives:
//! - **HMAC-SHA-256 + PBKDF2 + counter-mode KDF**: master password to key
//! - **AES-256-CBC with PKCS7**: one envelope (`IV || ciphertext`) per field
//!
//! ## Security Model
//!
//! - The master password and derived key are never persisted
//! - A verifier (`HMAC(key, "verifier")`) authenticates later opens
//! - Every field write draws a fresh random IV
//! - Key material is zeroized from memory on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the vault file
//! - Offline brute-force attacks on the master password (stretched KDF)
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory
//! - Undetected tampering of individual envelopes (CBC carries no MAC)

pub mod cipher;
pub mod kdf;
pub mod key;
pub mod passphrase;

pub use cipher::{decrypt, encrypt, BLOCK_SIZE, IV_SIZE};
pub use key::{
    compute_verifier, derive_key, generate_salt, verify_password, VaultKey, KEY_LENGTH, SALT_LENGTH,
};
pub use passphrase::{passphrase_strength_warning, validate_passphrase};
