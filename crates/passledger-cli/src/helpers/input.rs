//! Interactive input: master password, entry fields, confirmations.

use std::io::IsTerminal;

use dialoguer::{Confirm, Input, Password};
use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::constants::env_vars;
use crate::errors::CliError;

/// Whether prompts may be shown.
pub fn is_interactive(no_input: bool) -> bool {
    !no_input && std::io::stdin().is_terminal()
}

/// Master password from `PASSLEDGER_PASSWORD`, if set and non-blank.
pub(crate) fn env_password() -> Option<SecretString> {
    std::env::var(env_vars::PASSWORD)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}

pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<SecretString> {
    if !interactive {
        return Err(CliError::auth_failed_with_hint(
            "No master password provided and no TTY available.",
            format!("Hint: Set {}.", env_vars::PASSWORD),
        )
        .into());
    }
    Password::new()
        .with_prompt("Master password")
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))
}

pub fn prompt_init_passphrase(interactive: bool) -> anyhow::Result<SecretString> {
    if let Some(value) = env_password() {
        return Ok(value);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No master password provided and no TTY available. Set {}.",
            env_vars::PASSWORD
        ))
        .into());
    }
    Password::new()
        .with_prompt("New master password")
        .with_confirmation("Confirm master password", "Passwords do not match")
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))
}

/// Prompt for an entry's password, hidden and confirmed.
pub fn prompt_entry_password() -> anyhow::Result<Zeroizing<String>> {
    Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for a field that must not be empty unless `current` is kept.
pub fn prompt_required(label: &str, current: Option<&str>) -> anyhow::Result<String> {
    let mut input = Input::<String>::new().with_prompt(label);
    if let Some(value) = current {
        input = input.default(value.to_string());
    }
    input
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", label.to_lowercase(), e))
}

/// Prompt for an optional field; blank input means `None`.
pub fn prompt_optional(label: &str) -> anyhow::Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", label.to_lowercase(), e))?;
    let trimmed = value.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Ask a yes/no question. Non-interactive sessions get `false`.
pub fn confirm(prompt: &str, interactive: bool) -> anyhow::Result<bool> {
    if !interactive {
        return Ok(false);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}
