use crate::app::AppContext;
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let vault = ctx.open_vault(false)?;
    match vault.check_integrity() {
        Ok(report) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- sqlite integrity: OK");
                println!("- foreign keys: OK");
                println!("- metadata: OK");
                println!("- entries decrypted: {}", report.entries);
                println!("- groups: {}", report.groups);
            }
            vault.close();
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            Err(CliError::integrity_failed(
                format!("- error: {}", err),
                "Hint: Restore from a backup or export data before retrying.",
            )
            .into())
        }
    }
}
