//! Filesystem utilities for vault files and atomic replacement.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Whether `path` should be treated as a brand-new vault.
///
/// A missing file and a zero-length file both count as new; any other
/// metadata error is returned.
pub fn is_new_vault(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len() == 0),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(err) => Err(err),
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Build a unique temp path next to `path` (same directory, so a later
/// rename never crosses filesystems).
pub fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid vault filename"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("System time error: {}", e)))?
        .as_nanos();

    let temp_name = format!(".{}.{}.tmp", filename, nanos);
    Ok(match path.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    })
}

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_missing_and_empty_files_are_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.db");
        assert!(is_new_vault(&path).unwrap());

        File::create(&path).unwrap();
        assert!(is_new_vault(&path).unwrap());

        File::create(&path).unwrap().write_all(b"x").unwrap();
        assert!(!is_new_vault(&path).unwrap());
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("vault.db");

        ensure_parent_dir(&path).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());

        // Bare filenames have no parent to create.
        ensure_parent_dir(Path::new("vault.db")).unwrap();
    }

    #[test]
    fn test_temp_sibling_same_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.db");
        let temp = temp_sibling(&path).unwrap();

        assert_eq!(temp.parent(), path.parent());
        assert_ne!(temp, path);
        assert!(temp.to_string_lossy().ends_with(".tmp"));
    }

    #[test]
    fn test_rename_overwrites_existing() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp.txt");
        let dest = dir.path().join("dest.txt");

        File::create(&dest).unwrap().write_all(b"old").unwrap();
        File::create(&temp).unwrap().write_all(b"new").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }
}
