//! Configuration file handling.
//!
//! The config lives at `$XDG_CONFIG_HOME/passledger/config.toml` (or the path
//! in `PASSLEDGER_CONFIG`). Every section is optional; a missing file means
//! defaults throughout.

use std::path::{Path, PathBuf};

use passledger_core::{SearchField, SearchFields};
use serde::{Deserialize, Serialize};

/// Default vault file name inside the data directory.
pub const DEFAULT_VAULT_FILE: &str = "passwords.db";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassledgerConfig {
    #[serde(default)]
    pub vault: VaultSection,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Iteration count used by `init` when `--iterations` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf_iterations: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchSection {
    #[serde(default = "default_search_fields")]
    pub fields: Vec<String>,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            fields: default_search_fields(),
        }
    }
}

fn default_search_fields() -> Vec<String> {
    SearchFields::default()
        .enabled()
        .map(|field| field.as_str().to_string())
        .collect()
}

/// Seconds a copied password stays on the clipboard by default.
pub const DEFAULT_CLEAR_CLIPBOARD_SECONDS: u64 = 10;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplaySection {
    #[serde(default)]
    pub reveal_passwords: bool,
    /// Delay before `show --copy` clears the clipboard; 0 leaves it as is.
    #[serde(default = "default_clear_clipboard_seconds")]
    pub clear_clipboard_seconds: u64,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            reveal_passwords: false,
            clear_clipboard_seconds: DEFAULT_CLEAR_CLIPBOARD_SECONDS,
        }
    }
}

fn default_clear_clipboard_seconds() -> u64 {
    DEFAULT_CLEAR_CLIPBOARD_SECONDS
}

impl PassledgerConfig {
    pub fn with_vault_path(path: &Path) -> Self {
        Self {
            vault: VaultSection {
                path: Some(path.to_string_lossy().to_string()),
                kdf_iterations: None,
            },
            ..Self::default()
        }
    }

    /// Parse `[search] fields` into a field set.
    pub fn search_fields(&self) -> anyhow::Result<SearchFields> {
        let fields = self
            .search
            .fields
            .iter()
            .map(|name| name.parse::<SearchField>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SearchFields::only(fields))
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_vault_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(DEFAULT_VAULT_FILE))
}

/// Read the config, returning defaults when the file does not exist.
pub fn read_config(path: &Path) -> anyhow::Result<PassledgerConfig> {
    if !path.exists() {
        return Ok(PassledgerConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &PassledgerConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("passledger"));
        }
    }
    Ok(home_dir()?.join(".config").join("passledger"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("passledger"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("passledger"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, PassledgerConfig::default());
        assert_eq!(config.search_fields().unwrap(), SearchFields::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nreveal_passwords = true\n").unwrap();

        let config = read_config(&path).unwrap();
        assert!(config.display.reveal_passwords);
        assert_eq!(
            config.display.clear_clipboard_seconds,
            DEFAULT_CLEAR_CLIPBOARD_SECONDS
        );
        assert!(config.vault.path.is_none());
        assert_eq!(config.search.fields, vec!["title", "username", "url"]);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = PassledgerConfig::with_vault_path(Path::new("/tmp/v.db"));
        config.vault.kdf_iterations = Some(50_000);
        config.search.fields = vec!["title".into(), "notes".into()];

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.search_fields().unwrap(),
            SearchFields::only([SearchField::Title, SearchField::Notes])
        );
    }

    #[test]
    fn test_clipboard_timeout_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[display]\nclear_clipboard_seconds = 30\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.display.clear_clipboard_seconds, 30);
        assert!(!config.display.reveal_passwords);

        std::fs::write(&path, "[display]\nclear_clipboard_seconds = 0\n").unwrap();
        assert_eq!(read_config(&path).unwrap().display.clear_clipboard_seconds, 0);

        std::fs::write(&path, "[display]\nclear_clipboard_seconds = -5\n").unwrap();
        assert!(read_config(&path).is_err());

        assert_eq!(
            PassledgerConfig::default().display.clear_clipboard_seconds,
            DEFAULT_CLEAR_CLIPBOARD_SECONDS
        );
    }

    #[test]
    fn test_unknown_search_field_rejected() {
        let mut config = PassledgerConfig::default();
        config.search.fields = vec!["password".into()];
        assert!(config.search_fields().is_err());
    }
}
