use std::fs::File;
use std::io::BufReader;

use crate::app::AppContext;
use crate::cli::{ExchangeFormat, ImportArgs};
use crate::errors::CliError;

use super::exchange::read_entries;

/// Import entries from a CSV file or the JSON array written by `export`.
///
/// Ids in the file are ignored; every entry gets a fresh id. Groups are
/// created as needed. The whole file is written in one transaction, so a
/// rejected entry leaves the vault unchanged.
pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let file = File::open(&args.file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.file.display(), e))?;
    let format = ExchangeFormat::resolve(args.format, Some(&args.file));
    let parsed = read_entries(format, BufReader::new(file)).map_err(|e| match e {
        CliError::InvalidInput(msg) => {
            CliError::invalid_input(format!("{} ({})", msg, args.file.display()))
        }
        other => other,
    })?;

    let vault = ctx.open_vault(false)?;
    let ids = vault.save_entries(&parsed.entries)?;
    vault.close();

    tracing::info!(count = ids.len(), skipped = parsed.skipped, "Imported entries");
    if !ctx.quiet() {
        println!("Imported {} entries", ids.len());
        if parsed.skipped > 0 {
            eprintln!("Skipped {} incomplete rows", parsed.skipped);
        }
    }
    Ok(())
}
