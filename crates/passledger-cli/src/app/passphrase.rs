//! Master password handling and vault opening with retry logic.

use std::path::Path;

use passledger_core::fs::is_new_vault;
use passledger_core::{Vault, VaultError};
use secrecy::{ExposeSecret, SecretString};

use crate::constants::MAX_PASSWORD_ATTEMPTS;
use crate::errors::CliError;
use crate::helpers::{env_password, is_interactive, prompt_passphrase};

use super::resolver::missing_vault_message;

const FORGOTTEN_HINT: &str = "Hint: If you forgot your master password, the vault cannot be recovered.\n      Backups use the same master password.";

/// Open an existing vault, trying `PASSLEDGER_PASSWORD` before prompting.
///
/// Interactive sessions get up to three attempts; everything else gets one.
pub fn open_vault_with_retry(path: &Path, no_input: bool) -> anyhow::Result<Vault> {
    if is_new_vault(path)? {
        return Err(CliError::not_found(
            format!("No vault found at {}", path.display()),
            missing_vault_message(path),
        )
        .into());
    }

    if let Some(password) = env_password() {
        return open_with_password(path, &password).map_err(|err| -> anyhow::Error {
            match err {
                VaultError::AuthenticationFailed => {
                    CliError::auth_failed("Incorrect master password.").into()
                }
                other => other.into(),
            }
        });
    }

    let interactive = is_interactive(no_input);
    let max_attempts = if interactive { MAX_PASSWORD_ATTEMPTS } else { 1 };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let password = prompt_passphrase(interactive)?;
        match open_with_password(path, &password) {
            Ok(vault) => return Ok(vault),
            Err(VaultError::AuthenticationFailed) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    let err = if max_attempts > 1 {
                        CliError::auth_failed_with_hint(
                            "Too many failed master password attempts.",
                            FORGOTTEN_HINT,
                        )
                    } else {
                        CliError::auth_failed("Incorrect master password.")
                    };
                    return Err(err.into());
                }
                eprintln!(
                    "Incorrect master password. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn open_with_password(path: &Path, password: &SecretString) -> Result<Vault, VaultError> {
    Vault::open_or_create(path, password.expose_secret())
}
