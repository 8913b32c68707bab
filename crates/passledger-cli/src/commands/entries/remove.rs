use crate::app::AppContext;
use crate::cli::RemoveArgs;
use crate::errors::CliError;
use crate::helpers::{confirm, is_interactive};

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault(false)?;
    let entry = vault.get_entry(args.id)?;

    if !args.yes {
        let prompt = format!("Delete entry {} ({})?", entry.id, entry.title);
        if !confirm(&prompt, is_interactive(false))? {
            return Err(CliError::invalid_input(
                "Deletion not confirmed. Pass --yes to delete without prompting.",
            )
            .into());
        }
    }

    vault.delete_entry(entry.id)?;
    vault.close();
    if !ctx.quiet() {
        println!("Deleted entry {}", entry.id);
    }
    Ok(())
}
