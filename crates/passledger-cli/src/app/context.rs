//! Application context for the PassLedger CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::path::PathBuf;
use std::time::Duration;

use once_cell::unsync::OnceCell;
use passledger_core::{SearchFields, Vault};

use crate::cli::Cli;
use crate::config::{read_config, PassledgerConfig};

use super::passphrase::open_vault_with_retry;
use super::resolver::{resolve_config_path, resolve_vault_path};

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<PassledgerConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&PassledgerConfig> {
        self.config
            .get_or_try_init(|| read_config(&resolve_config_path()?))
    }

    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        resolve_vault_path(self.cli, self.config()?)
    }

    /// Search fields from config, used when `--field` is not given.
    pub fn default_search_fields(&self) -> anyhow::Result<SearchFields> {
        self.config()?.search_fields()
    }

    /// Whether passwords are shown without `--reveal`.
    pub fn reveal_by_default(&self) -> anyhow::Result<bool> {
        Ok(self.config()?.display.reveal_passwords)
    }

    /// How long `show --copy` keeps the password on the clipboard.
    pub fn clipboard_timeout(&self) -> anyhow::Result<Duration> {
        Ok(Duration::from_secs(
            self.config()?.display.clear_clipboard_seconds,
        ))
    }

    /// Open the existing vault, prompting for the master password as needed.
    pub fn open_vault(&self, no_input: bool) -> anyhow::Result<Vault> {
        let path = self.vault_path()?;
        open_vault_with_retry(&path, no_input)
    }
}
