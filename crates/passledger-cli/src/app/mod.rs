//! Application-level utilities for the PassLedger CLI.
//!
//! This module provides:
//! - Path resolution for config and vault files
//! - Lazily loaded configuration bundled with CLI arguments
//! - Master password handling with retry logic

mod context;
mod passphrase;
mod resolver;

pub use context::AppContext;
pub use resolver::resolve_config_path;
