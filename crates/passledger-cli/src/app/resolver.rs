//! Path resolution for config and vault files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_vault_path, PassledgerConfig};
use crate::constants::env_vars;

/// Resolve the config file path, checking PASSLEDGER_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env_vars::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the vault path: `--vault`/`PASSLEDGER_PATH`, then config, then the
/// XDG data directory.
pub fn resolve_vault_path(cli: &Cli, config: &PassledgerConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.vault.clone() {
        return Ok(path);
    }
    if let Some(path) = config.vault.path.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_vault_path()
}

/// Hint shown when the vault file is missing.
pub fn missing_vault_message(path: &Path) -> String {
    format!(
        "Hint: Run `passledger init` to create {}, or point {} at an existing vault.",
        path.display(),
        env_vars::VAULT_PATH
    )
}
