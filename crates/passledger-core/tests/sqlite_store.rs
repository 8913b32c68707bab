use std::fs;

use passledger_core::storage::{EncryptedFields, MetaRecord, SqliteStore, VaultStore};
use passledger_core::VaultError;

fn fields(title: &[u8]) -> EncryptedFields {
    EncryptedFields {
        title: title.to_vec(),
        username: vec![0; 32],
        password: vec![1; 32],
        url: Some(vec![2; 32]),
        notes: None,
    }
}

fn meta() -> MetaRecord {
    MetaRecord {
        salt: vec![7; 16],
        iterations: 1000,
        verifier: vec![9; 32],
    }
}

fn initialized(path: &std::path::Path) -> SqliteStore {
    let store = SqliteStore::open(path).expect("open should succeed");
    store.initialize(&meta()).expect("store should initialize");
    store
}

#[test]
fn test_rows_ordered_by_id_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let store = initialized(&path);
        for title in [b"c".as_slice(), b"a", b"b"] {
            store.insert_entry(&fields(title), Some("G")).unwrap();
        }
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.read_meta().unwrap(), meta());
    let rows = store.list_entries().unwrap();
    let titles: Vec<_> = rows.iter().map(|r| r.fields.title.clone()).collect();
    assert_eq!(titles, vec![b"c".to_vec(), b"a".to_vec(), b"b".to_vec()]);
    assert!(rows.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_schema_creation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    let store = initialized(&path);
    store.insert_entry(&fields(b"x"), None).unwrap();
    store.create_schema().unwrap();

    assert_eq!(store.list_entries().unwrap().len(), 1);
}

#[test]
fn test_update_replaces_all_fields_and_group() {
    let dir = tempfile::tempdir().unwrap();
    let store = initialized(&dir.path().join("store.db"));

    let id = store.insert_entry(&fields(b"old"), Some("A")).unwrap();
    let mut replacement = fields(b"new");
    replacement.url = None;
    replacement.notes = Some(vec![3; 16]);
    store.update_entry(id, &replacement, Some("B")).unwrap();

    let row = store.get_entry(id).unwrap().unwrap();
    assert_eq!(row.fields, replacement);
    assert_eq!(row.group.as_deref(), Some("B"));

    // The old group stays until it is deleted explicitly.
    let names: Vec<_> = store
        .list_groups()
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn test_delete_group_leaves_other_groups_and_ungrouped_entries() {
    let dir = tempfile::tempdir().unwrap();
    let store = initialized(&dir.path().join("store.db"));

    store.insert_entry(&fields(b"1"), Some("Doomed")).unwrap();
    let kept_grouped = store.insert_entry(&fields(b"2"), Some("Kept")).unwrap();
    let kept_loose = store.insert_entry(&fields(b"3"), None).unwrap();

    assert_eq!(store.delete_group("Doomed").unwrap(), 1);

    let ids: Vec<_> = store.list_entries().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![kept_grouped, kept_loose]);
    store.check_integrity().unwrap();
}

#[test]
fn test_empty_group_delete_removes_only_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = initialized(&dir.path().join("store.db"));

    store.insert_group("Empty").unwrap();
    assert_eq!(store.delete_group("Empty").unwrap(), 0);
    assert!(store.list_groups().unwrap().is_empty());
}

#[test]
fn test_integrity_detects_dangling_group_reference() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = initialized(&path);
    store.insert_entry(&fields(b"x"), Some("G")).unwrap();
    drop(store);

    // Bypass foreign keys the way an external tool would.
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute("UPDATE entries SET group_id = 999", []).unwrap();
    drop(conn);

    let store = SqliteStore::open(&path).unwrap();
    assert!(matches!(
        store.check_integrity(),
        Err(VaultError::Storage(_))
    ));
}

#[test]
fn test_backup_replaces_existing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let store = initialized(&dir.path().join("store.db"));
    store.insert_entry(&fields(b"x"), None).unwrap();

    let dest = dir.path().join("backup.db");
    fs::write(&dest, b"stale").unwrap();
    store.backup_to(&dest).unwrap();

    let copy = SqliteStore::open(&dest).unwrap();
    assert_eq!(copy.read_meta().unwrap(), meta());
    assert_eq!(copy.list_entries().unwrap().len(), 1);

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
