use passledger_core::{filter_by_group, GroupSelection};

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{entries_json, print_entry_list};
use crate::ui::OutputMode;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let mode = OutputMode::from_env(args.json, args.format.as_deref())?;
    let reveal = args.reveal || ctx.reveal_by_default()?;
    let vault = ctx.open_vault(false)?;

    let selection = args
        .group
        .as_deref()
        .map(GroupSelection::from_name)
        .unwrap_or_default();
    let entries = filter_by_group(&vault.load_all_entries()?, &selection);
    vault.close();

    if mode.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries_json(&entries, reveal))?
        );
        return Ok(());
    }
    if mode.is_pretty() && !ctx.quiet() {
        println!(
            "{} ({} entr{})",
            selection.display_name(),
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" }
        );
    }
    print_entry_list(mode, &entries, reveal);
    Ok(())
}
