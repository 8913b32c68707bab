use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault(false)?;
    let mut entry = vault.get_entry(args.id)?;

    let mut changed = false;
    let mut set = |slot: &mut String, value: &Option<String>| {
        if let Some(value) = value {
            *slot = value.clone();
            changed = true;
        }
    };
    set(&mut entry.title, &args.title);
    set(&mut entry.username, &args.username);
    set(&mut entry.password, &args.password);

    if entry.title.trim().is_empty() {
        return Err(CliError::invalid_input("Title cannot be empty.").into());
    }

    if args.clear_url {
        entry.url = None;
        changed = true;
    } else if let Some(url) = &args.url {
        entry.url = Some(url.clone());
        changed = true;
    }
    if args.clear_notes {
        entry.notes = None;
        changed = true;
    } else if let Some(notes) = &args.notes {
        entry.notes = Some(notes.clone());
        changed = true;
    }
    if args.no_group {
        entry.group = None;
        changed = true;
    } else if let Some(group) = &args.group {
        entry.group = Some(group.clone());
        changed = true;
    }

    if !changed {
        return Err(CliError::invalid_input(
            "Nothing to change. Pass at least one field flag (see `passledger edit --help`).",
        )
        .into());
    }

    vault.update_entry(&entry)?;
    vault.close();
    if !ctx.quiet() {
        println!("Updated entry {}", entry.id);
    }
    Ok(())
}
