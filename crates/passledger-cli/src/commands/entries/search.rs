use passledger_core::{FilterSettings, GroupSelection, SearchFields};

use crate::app::AppContext;
use crate::cli::SearchArgs;
use crate::output::{entries_json, print_entry_list};
use crate::ui::OutputMode;

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let mode = OutputMode::from_env(args.json, args.format.as_deref())?;
    let reveal = args.reveal || ctx.reveal_by_default()?;
    let fields = if args.fields.is_empty() {
        ctx.default_search_fields()?
    } else {
        SearchFields::only(args.fields.iter().copied())
    };
    let settings = FilterSettings {
        group: args
            .group
            .as_deref()
            .map(GroupSelection::from_name)
            .unwrap_or_default(),
        query: args.query.clone(),
        fields,
    };
    tracing::debug!(
        fields = ?settings.fields.enabled().collect::<Vec<_>>(),
        group = settings.group.display_name(),
        "Searching entries"
    );

    let vault = ctx.open_vault(false)?;
    let entries = settings.apply(&vault.load_all_entries()?);
    vault.close();

    if mode.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries_json(&entries, reveal))?
        );
    } else {
        print_entry_list(mode, &entries, reveal);
    }
    Ok(())
}
