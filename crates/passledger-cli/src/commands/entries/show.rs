use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::clipboard::copy_then_clear;
use crate::output::{entry_json, print_entry};
use crate::ui::OutputMode;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let mode = OutputMode::from_env(args.json, None)?;
    let reveal = args.reveal || ctx.reveal_by_default()?;
    let vault = ctx.open_vault(false)?;
    let entry = vault.get_entry(args.id)?;
    vault.close();

    if mode.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&entry_json(&entry, reveal))?
        );
    } else {
        print_entry(mode, &entry, reveal);
    }

    if args.copy {
        let timeout = ctx.clipboard_timeout()?;
        if !ctx.quiet() {
            if timeout.is_zero() {
                eprintln!("Copied password for '{}' to the clipboard.", entry.title);
            } else {
                eprintln!(
                    "Copied password for '{}' to the clipboard; clearing in {}s.",
                    entry.title,
                    timeout.as_secs()
                );
            }
        }
        copy_then_clear(&entry.password, timeout)?;
    }
    Ok(())
}
