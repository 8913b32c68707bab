//! Prompting helpers for the CLI.

mod input;

pub(crate) use input::env_password;

pub use input::{
    confirm, is_interactive, prompt_entry_password, prompt_init_passphrase, prompt_optional,
    prompt_passphrase, prompt_required,
};
