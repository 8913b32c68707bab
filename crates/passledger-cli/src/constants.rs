//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (vault, entry, group).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong master password, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// Integrity check failed or vault contents unreadable.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    /// Vault file path (same as `--vault`).
    pub const VAULT_PATH: &str = "PASSLEDGER_PATH";

    /// Master password; skips the prompt.
    pub const PASSWORD: &str = "PASSLEDGER_PASSWORD";

    /// Config file override.
    pub const CONFIG: &str = "PASSLEDGER_CONFIG";

    /// Log filter directives (overrides `--verbose`).
    pub const LOG: &str = "PASSLEDGER_LOG";
}

/// Interactive master password attempts before giving up.
pub const MAX_PASSWORD_ATTEMPTS: u32 = 3;
