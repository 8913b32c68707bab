use crate::app::AppContext;
use crate::cli::GroupCommands;
use crate::errors::CliError;
use crate::helpers::{confirm, is_interactive};
use crate::output::print_groups;

pub fn handle_group(ctx: &AppContext, command: &GroupCommands) -> anyhow::Result<()> {
    let vault = ctx.open_vault(false)?;
    match command {
        GroupCommands::List { json } => {
            let groups = vault.list_groups()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                print_groups(&groups);
            }
        }
        GroupCommands::Add { name } => {
            vault.add_group(name)?;
            if !ctx.quiet() {
                println!("Added group \"{}\"", name.trim());
            }
        }
        GroupCommands::Rename { old, new } => {
            vault.rename_group(old, new)?;
            if !ctx.quiet() {
                println!("Renamed group \"{}\" to \"{}\"", old.trim(), new.trim());
            }
        }
        GroupCommands::Rm { name, yes } => {
            if !yes {
                let prompt = format!("Delete group \"{}\" and every entry in it?", name.trim());
                if !confirm(&prompt, is_interactive(false))? {
                    return Err(CliError::invalid_input(
                        "Deletion not confirmed. Pass --yes to delete without prompting.",
                    )
                    .into());
                }
            }
            let removed = vault.delete_group(name)?;
            if !ctx.quiet() {
                println!(
                    "Deleted group \"{}\" ({} entr{} removed)",
                    name.trim(),
                    removed,
                    if removed == 1 { "y" } else { "ies" }
                );
            }
        }
    }
    vault.close();
    Ok(())
}
