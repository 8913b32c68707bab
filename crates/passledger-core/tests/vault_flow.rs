use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use passledger_core::{
    filter_entries, NewEntry, SearchFields, Vault, VaultError, VaultOptions, DEFAULT_ITERATIONS,
};
use tempfile::TempDir;

const FAST: VaultOptions = VaultOptions { iterations: 1000 };

fn vault_path(dir: &TempDir) -> PathBuf {
    dir.path().join("passwords.db")
}

fn open(path: &Path, password: &str) -> Result<Vault, VaultError> {
    Vault::open_or_create_with(path, password, &FAST)
}

fn google() -> NewEntry {
    NewEntry::new("Google", "u@gmail.com", "secret")
        .with_url("https://google.com")
        .with_group("Web")
}

#[test]
fn test_end_to_end_create_reopen_and_wrong_password() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);

    let vault = Vault::open_or_create(&path, "pw1").expect("create should succeed");
    assert_eq!(vault.iterations(), DEFAULT_ITERATIONS);
    let id = vault.save_entry(&google()).expect("save should succeed");
    vault.close();

    let vault = Vault::open_or_create(&path, "pw1").expect("reopen should succeed");
    let entries = vault.load_all_entries().unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.id, id);
    assert_eq!(entry.title, "Google");
    assert_eq!(entry.username, "u@gmail.com");
    assert_eq!(entry.password, "secret");
    assert_eq!(entry.url.as_deref(), Some("https://google.com"));
    assert_eq!(entry.group.as_deref(), Some("Web"));
    vault.close();

    let result = Vault::open_or_create(&path, "wrongpw");
    assert!(matches!(result, Err(VaultError::AuthenticationFailed)));
}

#[test]
fn test_plaintext_never_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);

    let vault = open(&path, "pw1").unwrap();
    vault
        .save_entry(&google().with_notes("very-distinctive-note"))
        .unwrap();
    vault.close();

    let on_disk = fs::read(&path).unwrap();
    for needle in [
        "u@gmail.com",
        "secret",
        "google.com",
        "very-distinctive-note",
        "pw1",
    ] {
        assert!(
            !on_disk.windows(needle.len()).any(|w| w == needle.as_bytes()),
            "found plaintext {:?} in vault file",
            needle
        );
    }
}

#[test]
fn test_creation_iterations_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);

    open(&path, "pw1").unwrap().close();

    // Options only apply on create; reopening keeps the stored count.
    let vault =
        Vault::open_or_create_with(&path, "pw1", &VaultOptions { iterations: 5 }).unwrap();
    assert_eq!(vault.iterations(), 1000);
}

#[test]
fn test_empty_file_is_initialized() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);
    fs::write(&path, b"").unwrap();

    let vault = open(&path, "pw1").expect("empty file should be treated as new");
    assert!(vault.load_all_entries().unwrap().is_empty());
}

#[test]
fn test_nested_directories_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("vault.db");

    open(&path, "pw1").unwrap().close();
    assert!(path.exists());
}

#[test]
fn test_empty_password_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);

    let result = open(&path, "");
    assert!(matches!(result, Err(VaultError::InvalidInput(_))));
    assert!(!path.exists());
}

#[test]
fn test_garbage_file_is_metadata_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);
    fs::write(&path, vec![0x5Au8; 4096]).unwrap();

    let result = open(&path, "pw1");
    match result {
        Err(err) => {
            assert!(matches!(err, VaultError::MetadataUnreadable(_)), "{err}");
            assert!(err.is_fatal());
        }
        Ok(_) => panic!("garbage file should not open"),
    }
}

#[test]
fn test_missing_meta_row_is_metadata_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);
    open(&path, "pw1").unwrap().close();

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute("DELETE FROM meta", []).unwrap();
    drop(conn);

    assert!(matches!(
        open(&path, "pw1"),
        Err(VaultError::MetadataUnreadable(_))
    ));
}

#[test]
fn test_group_cascades_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);

    let vault = open(&path, "pw1").unwrap();
    vault.save_entry(&google()).unwrap();
    vault
        .save_entry(&NewEntry::new("GitHub", "octo", "pat").with_group("Web"))
        .unwrap();
    vault
        .save_entry(&NewEntry::new("Bank", "alice", "pin").with_group("Finance"))
        .unwrap();
    vault.rename_group("Web", "Internet").unwrap();
    vault.close();

    let vault = open(&path, "pw1").unwrap();
    let groups = vault.list_groups().unwrap();
    assert!(groups.contains(&"Internet".to_string()));
    assert!(!groups.contains(&"Web".to_string()));
    let entries = vault.load_all_entries().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries
            .iter()
            .filter(|e| e.group.as_deref() == Some("Internet"))
            .count(),
        2
    );

    assert_eq!(vault.delete_group("Internet").unwrap(), 2);
    vault.close();

    let vault = open(&path, "pw1").unwrap();
    let entries = vault.load_all_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries
        .iter()
        .all(|e| e.group.as_deref() != Some("Internet")));
    assert_eq!(vault.list_groups().unwrap(), vec!["Finance".to_string()]);
    assert!(matches!(
        vault.delete_group("Internet"),
        Err(VaultError::GroupNotFound(_))
    ));
}

#[test]
fn test_group_errors() {
    let dir = tempfile::tempdir().unwrap();
    let vault = open(&vault_path(&dir), "pw1").unwrap();

    vault.add_group("Web").unwrap();
    assert!(matches!(
        vault.add_group("Web"),
        Err(VaultError::DuplicateGroup(_))
    ));
    assert!(matches!(
        vault.rename_group("Nope", "Other"),
        Err(VaultError::GroupNotFound(_))
    ));
    assert!(matches!(
        vault.rename_group("Web", "All"),
        Err(VaultError::InvalidInput(_))
    ));
}

#[test]
fn test_ids_ascending_and_not_reused() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);

    let vault = open(&path, "pw1").unwrap();
    let a = vault.save_entry(&NewEntry::new("a", "u", "p")).unwrap();
    let b = vault.save_entry(&NewEntry::new("b", "u", "p")).unwrap();
    vault.delete_entry(b).unwrap();
    vault.close();

    let vault = open(&path, "pw1").unwrap();
    let c = vault.save_entry(&NewEntry::new("c", "u", "p")).unwrap();
    assert!(c > b);

    let titles: Vec<_> = vault
        .load_all_entries()
        .unwrap()
        .into_iter()
        .map(|e| (e.id, e.title))
        .collect();
    assert_eq!(titles, vec![(a, "a".to_string()), (c, "c".to_string())]);
}

#[test]
fn test_tampered_envelope_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);

    let vault = open(&path, "pw1").unwrap();
    vault.save_entry(&google()).unwrap();
    let victim = vault.save_entry(&NewEntry::new("b", "u", "p")).unwrap();
    vault.close();

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute(
        "UPDATE entries SET enc_username = x'00010203' WHERE id = ?1",
        [victim],
    )
    .unwrap();
    drop(conn);

    let vault = open(&path, "pw1").unwrap();
    assert!(matches!(
        vault.load_all_entries(),
        Err(VaultError::CorruptCiphertext(_))
    ));
    assert!(vault.check_integrity().is_err());
}

#[test]
fn test_backup_opens_with_same_password() {
    let dir = tempfile::tempdir().unwrap();
    let path = vault_path(&dir);
    let backup = dir.path().join("backups").join("copy.db");

    let vault = open(&path, "pw1").unwrap();
    vault.save_entry(&google()).unwrap();
    vault.backup(&backup).unwrap();
    assert!(matches!(
        vault.backup(&path),
        Err(VaultError::InvalidInput(_))
    ));
    vault.close();

    let copy = open(&backup, "pw1").unwrap();
    assert_eq!(copy.load_all_entries().unwrap()[0].title, "Google");
    copy.check_integrity().unwrap();
    assert!(matches!(
        open(&backup, "wrongpw"),
        Err(VaultError::AuthenticationFailed)
    ));
}

#[test]
fn test_concurrent_saves_are_serialized() {
    let dir = tempfile::tempdir().unwrap();
    let vault = Arc::new(open(&vault_path(&dir), "pw1").unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let vault = Arc::clone(&vault);
            thread::spawn(move || {
                for i in 0..10 {
                    vault
                        .save_entry(
                            &NewEntry::new(format!("t{t}-{i}"), "u", "p")
                                .with_group(format!("G{}", i % 2)),
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entries = vault.load_all_entries().unwrap();
    assert_eq!(entries.len(), 40);
    assert_eq!(vault.list_groups().unwrap(), vec!["G0".to_string(), "G1".to_string()]);

    vault.rename_group("G0", "Even").unwrap();
    let report = vault.check_integrity().unwrap();
    assert_eq!(report.entries, 40);
    assert_eq!(report.groups, 2);
}

#[test]
fn test_group_delete_racing_grouped_saves() {
    let dir = tempfile::tempdir().unwrap();
    let vault = Arc::new(open(&vault_path(&dir), "pw1").unwrap());

    for round in 0..5 {
        vault
            .save_entry(&NewEntry::new(format!("seed-{round}"), "u", "p").with_group("Web"))
            .unwrap();

        let writer = {
            let vault = Arc::clone(&vault);
            thread::spawn(move || {
                for i in 0..20 {
                    vault
                        .save_entry(
                            &NewEntry::new(format!("r{round}-{i}"), "u", "p").with_group("Web"),
                        )
                        .unwrap();
                }
            })
        };
        let deleter = {
            let vault = Arc::clone(&vault);
            thread::spawn(move || {
                for _ in 0..20 {
                    match vault.delete_group("Web") {
                        Ok(_) | Err(VaultError::GroupNotFound(_)) => {}
                        Err(other) => panic!("unexpected error: {:?}", other),
                    }
                }
            })
        };
        writer.join().unwrap();
        deleter.join().unwrap();

        vault.check_integrity().unwrap();
        let groups = vault.list_groups().unwrap();
        for entry in vault.load_all_entries().unwrap() {
            if let Some(group) = &entry.group {
                assert!(groups.contains(group), "entry {} has dangling group", entry.id);
            }
        }
    }
}

#[test]
fn test_filter_over_loaded_entries() {
    let dir = tempfile::tempdir().unwrap();
    let vault = open(&vault_path(&dir), "pw1").unwrap();
    vault.save_entry(&google()).unwrap();
    vault
        .save_entry(&NewEntry::new("Bank", "alice", "pin"))
        .unwrap();

    let entries = vault.load_all_entries().unwrap();
    let found = filter_entries(&entries, "GMAIL", &SearchFields::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Google");
    assert_eq!(filter_entries(&entries, "", &SearchFields::none()), entries);
}
