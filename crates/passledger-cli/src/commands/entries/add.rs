use passledger_core::NewEntry;
use zeroize::Zeroizing;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::generator::{generate_password, CharacterSets};
use crate::helpers::{is_interactive, prompt_entry_password, prompt_optional, prompt_required};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let interactive = is_interactive(args.no_input);
    let vault = ctx.open_vault(args.no_input)?;

    let title = match &args.title {
        Some(title) => title.clone(),
        None if interactive => prompt_required("Title", None)?,
        None => {
            return Err(CliError::invalid_input("--title is required without a TTY.").into());
        }
    };
    if title.trim().is_empty() {
        return Err(CliError::invalid_input("Title cannot be empty.").into());
    }

    let username = match &args.username {
        Some(username) => username.clone(),
        None if interactive => prompt_optional("Username")?.unwrap_or_default(),
        None => String::new(),
    };

    let password: Zeroizing<String> = if args.generate {
        generate_password(args.length, &CharacterSets::default())?
    } else if let Some(password) = &args.password {
        Zeroizing::new(password.clone())
    } else if interactive {
        prompt_entry_password()?
    } else {
        return Err(
            CliError::invalid_input("--password or --generate is required without a TTY.").into(),
        );
    };

    let url = match &args.url {
        Some(url) => Some(url.clone()),
        None if interactive => prompt_optional("URL")?,
        None => None,
    };

    let mut entry = NewEntry::new(title, username, password.as_str());
    entry.url = url;
    entry.notes = args.notes.clone();
    entry.group = args.group.clone();

    let id = vault.save_entry(&entry)?;
    vault.close();

    if !ctx.quiet() {
        println!("Added entry {}", id);
        if args.generate {
            println!("Generated a {}-character password.", args.length);
        }
    }
    Ok(())
}
