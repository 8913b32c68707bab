use passledger_core::crypto::passphrase_strength_warning;
use passledger_core::fs::is_new_vault;
use passledger_core::{Vault, VaultOptions, DEFAULT_ITERATIONS};
use secrecy::ExposeSecret;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, PassledgerConfig};
use crate::errors::CliError;
use crate::helpers::{is_interactive, prompt_init_passphrase};
use crate::ui::{hint, OutputMode};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let path = ctx.vault_path()?;
    if !is_new_vault(&path)? {
        return Err(CliError::invalid_input(format!(
            "A vault already exists at {}",
            path.display()
        ))
        .into());
    }

    let iterations = args
        .iterations
        .or(ctx.config()?.vault.kdf_iterations)
        .unwrap_or(DEFAULT_ITERATIONS);

    let password = prompt_init_passphrase(is_interactive(args.no_input))?;
    if let Some(warning) = passphrase_strength_warning(password.expose_secret()) {
        eprintln!("Warning: {}", warning);
    }

    let vault = Vault::open_or_create_with(
        &path,
        password.expose_secret(),
        &VaultOptions { iterations },
    )?;
    vault.close();

    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        write_config(&config_path, &PassledgerConfig::with_vault_path(&path))?;
        if !ctx.quiet() {
            println!("Wrote config to {}", config_path.display());
        }
    }

    if !ctx.quiet() {
        println!("Initialized new vault at {}", path.display());
        let mode = OutputMode::from_env(false, None)?;
        println!(
            "{}",
            hint(mode, "Run `passledger add` to store your first credential.")
        );
    }
    Ok(())
}
