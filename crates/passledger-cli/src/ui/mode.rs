//! Output mode routing logic.

use std::io::IsTerminal;

use crate::errors::CliError;

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON output only
    Json,
    /// Tab-separated text, stable for scripts
    #[default]
    Plain,
    /// Bordered tables (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// Routing rules:
    /// 1. `--json` is exclusive and cannot be combined with `--format`
    /// 2. `--format` must be `table` or `plain`
    /// 3. `--format plain` or `TERM=dumb` forces plain
    /// 4. Pretty only when stdout is a TTY
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Result<Self, CliError> {
        if json_flag {
            if format_flag.is_some() {
                return Err(CliError::invalid_input("--format cannot be used with --json"));
            }
            return Ok(Self::Json);
        }

        match format_flag {
            None | Some("table") => {}
            Some("plain") => return Ok(Self::Plain),
            Some(other) => {
                return Err(CliError::invalid_input(format!(
                    "Unknown format '{}' (expected table or plain)",
                    other
                )))
            }
        }

        if term_is_dumb || !is_tty {
            Ok(Self::Plain)
        } else {
            Ok(Self::Pretty)
        }
    }

    /// Resolve against the real stdout and `TERM`.
    pub fn from_env(json_flag: bool, format_flag: Option<&str>) -> Result<Self, CliError> {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        Self::resolve(json_flag, format_flag, is_tty, term_is_dumb)
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
