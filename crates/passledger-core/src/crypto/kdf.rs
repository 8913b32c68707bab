//! HMAC-SHA-256 building blocks for key derivation.
//!
//! `counter_kdf` is an HMAC-based key-derivation function in counter mode:
//! each output block is `HMAC(seed, label || 0x00 || context || counter_be32)`
//! with the counter starting at 1. The label binds the output to a single
//! usage, so independent keys can later be derived from the same seed.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Result, VaultError};

type HmacSha256 = Hmac<Sha256>;

/// Output length of HMAC-SHA-256 in bytes.
pub const HMAC_LENGTH: usize = 32;

/// Largest output `counter_kdf` will produce.
const MAX_KDF_OUTPUT: usize = 64;

/// Compute `HMAC-SHA-256(key, data)`.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; HMAC_LENGTH]> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| VaultError::InvalidInput(format!("HMAC key rejected: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Derive `length` bytes from `seed` for the given `label`/`context`.
///
/// # Errors
///
/// Returns `VaultError::InvalidInput` if `length` is zero or above 64 bytes.
pub fn counter_kdf(
    seed: &[u8],
    label: &[u8],
    context: &[u8],
    length: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if length == 0 || length > MAX_KDF_OUTPUT {
        return Err(VaultError::InvalidInput(format!(
            "KDF output length must be 1..={} bytes (got {})",
            MAX_KDF_OUTPUT, length
        )));
    }

    let mut out = Zeroizing::new(Vec::with_capacity(length + HMAC_LENGTH));
    let mut counter: u32 = 1;
    while out.len() < length {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(seed)
            .map_err(|e| VaultError::InvalidInput(format!("HMAC key rejected: {}", e)))?;
        mac.update(label);
        mac.update(&[0u8]);
        mac.update(context);
        mac.update(&counter.to_be_bytes());
        let mut block: [u8; HMAC_LENGTH] = mac.finalize().into_bytes().into();
        out.extend_from_slice(&block);
        block.zeroize();
        counter += 1;
    }
    out.truncate(length);
    Ok(out)
}
