use std::io::IsTerminal;

use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::errors::CliError;

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault(false)?;
    if std::io::stdin().is_terminal() && !ctx.quiet() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Back up vault to {}?", args.destination.display()))
            .default(true)
            .interact()?;
        if !proceed {
            return Err(CliError::invalid_input("Backup cancelled").into());
        }
    }

    vault.backup(&args.destination)?;
    vault.close();

    if !ctx.quiet() {
        println!("Backed up vault to {}", args.destination.display());
    }
    Ok(())
}
