//! Per-field AES-256-CBC envelopes.
//!
//! An envelope is `IV (16 bytes) || ciphertext (N * 16 bytes)`, where the
//! ciphertext is the PKCS7-padded plaintext encrypted in CBC mode. Every call
//! to [`encrypt`] draws a fresh random IV, so encrypting the same plaintext
//! twice yields different envelopes.
//!
//! There is no authentication tag: a wrong key or a tampered envelope is
//! detected only when the padding check fails after decryption.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;

use super::key::KEY_LENGTH;
use crate::error::{Result, VaultError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Cipher block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// IV length in bytes (one block).
pub const IV_SIZE: usize = BLOCK_SIZE;

fn check_key(key: &[u8]) -> Result<()> {
    if key.len() != KEY_LENGTH {
        return Err(VaultError::InvalidKeySize(key.len()));
    }
    Ok(())
}

/// Encrypt `plaintext` into a self-contained envelope.
///
/// # Errors
///
/// Returns `VaultError::InvalidKeySize` if `key` is not 32 bytes.
///
/// # Examples
///
/// ```
/// use passledger_core::crypto::{decrypt, encrypt};
///
/// let key = [7u8; 32];
/// let envelope = encrypt(&key, b"secret").unwrap();
/// assert_eq!(decrypt(&key, &envelope).unwrap(), b"secret");
/// ```
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;

    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|_| VaultError::InvalidKeySize(key.len()))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut envelope = Vec::with_capacity(IV_SIZE + ciphertext.len());
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&ciphertext);
    Ok(envelope)
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// # Errors
///
/// Returns `VaultError::InvalidKeySize` if `key` is not 32 bytes, and
/// `VaultError::CorruptCiphertext` if:
/// - The envelope is shorter than one IV
/// - The ciphertext is not a whole number of blocks
/// - The PKCS7 padding is invalid after decryption (wrong key or tampering)
pub fn decrypt(key: &[u8], envelope: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;

    if envelope.len() < IV_SIZE {
        return Err(VaultError::CorruptCiphertext(format!(
            "envelope is {} bytes, shorter than the {}-byte IV",
            envelope.len(),
            IV_SIZE
        )));
    }
    let (iv, ciphertext) = envelope.split_at(IV_SIZE);
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(VaultError::CorruptCiphertext(format!(
            "ciphertext length {} is not a multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| VaultError::InvalidKeySize(key.len()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| VaultError::CorruptCiphertext("invalid PKCS7 padding".to_string()))
}
