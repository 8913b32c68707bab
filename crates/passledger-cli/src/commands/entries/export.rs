use std::io::Write;
use std::path::Path;

use crate::app::AppContext;
use crate::cli::{ExchangeFormat, ExportArgs};

use super::exchange::write_entries;

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault(false)?;
    let entries = vault.load_all_entries()?;
    vault.close();

    let format = ExchangeFormat::resolve(args.format, args.output.as_deref());
    let mut buffer = Vec::new();
    write_entries(format, &entries, &mut buffer)?;

    match &args.output {
        Some(path) => {
            write_private(path, &buffer)?;
            if !ctx.quiet() {
                eprintln!(
                    "Warning: {} contains every password in plaintext. Delete it when done.",
                    path.display()
                );
                println!("Exported {} entries to {}", entries.len(), path.display());
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&buffer)?;
        }
    }
    Ok(())
}

/// Write `contents` to `path`, leaving the file readable only by the owner
/// whether or not it already existed.
fn write_private(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", path.display(), e))?;
    // `mode` only applies on creation; tighten an existing file before writing.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(|e| anyhow::anyhow!("Failed to restrict {}: {}", path.display(), e))?;
    }
    file.write_all(contents)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_existing_file_is_made_private() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(&path, "old contents that are longer").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_private(&path, b"new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }
}
