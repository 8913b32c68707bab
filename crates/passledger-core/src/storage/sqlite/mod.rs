//! SQLite storage backend.
//!
//! The vault lives in a single SQLite file. Field values are already
//! encrypted envelopes when they reach this module, so the file itself is
//! written in place; only backups go through a temp file and atomic rename.

mod row;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Transaction};
use tracing::debug;

use crate::crypto::kdf::HMAC_LENGTH;
use crate::crypto::SALT_LENGTH;
use crate::error::{Result, VaultError};
use crate::storage::traits::VaultStore;
use crate::storage::types::{EncryptedFields, EntryRow, Group, MetaRecord, NewRow};

use row::{read_entry_row, ENTRY_SELECT};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        salt BLOB NOT NULL,
        iterations INTEGER NOT NULL,
        verifier BLOB NOT NULL
    );

    CREATE TABLE IF NOT EXISTS groups (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );

    -- AUTOINCREMENT: ids are never reused after a delete
    CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        enc_title BLOB NOT NULL,
        enc_username BLOB NOT NULL,
        enc_password BLOB NOT NULL,
        enc_url BLOB,
        enc_notes BLOB,
        group_id INTEGER,

        FOREIGN KEY (group_id) REFERENCES groups(id)
    );

    CREATE INDEX IF NOT EXISTS entries_group_id ON entries (group_id);
"#;

/// SQLite-backed vault store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the SQLite file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::MetadataUnreadable` if the file exists but is not
    /// a SQLite database, or `VaultError::Storage` for I/O failures.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(map_open_error)?;
        configure(&conn)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open a transient in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Path of the backing file (`None` for in-memory stores).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| VaultError::Storage("SQLite connection poisoned".to_string()))
    }
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(map_open_error)
}

fn is_not_a_database(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::NotADatabase
    )
}

fn map_open_error(err: rusqlite::Error) -> VaultError {
    if is_not_a_database(&err) {
        VaultError::MetadataUnreadable("file is not a vault database".to_string())
    } else {
        err.into()
    }
}

/// Only a missing or malformed meta row is `MetadataUnreadable`; I/O and
/// locking failures stay `Storage`.
fn map_meta_error(err: rusqlite::Error) -> VaultError {
    let reason = match &err {
        rusqlite::Error::QueryReturnedNoRows => Some("metadata row missing".to_string()),
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            Some(format!("malformed metadata: {}", err))
        }
        rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("no such table") => {
            Some("metadata table missing".to_string())
        }
        _ if is_not_a_database(&err) => Some("file is not a vault database".to_string()),
        _ => None,
    };
    match reason {
        Some(reason) => VaultError::MetadataUnreadable(reason),
        None => err.into(),
    }
}

fn group_id(tx: &Transaction<'_>, name: &str) -> Result<Option<i64>> {
    Ok(tx
        .query_row("SELECT id FROM groups WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()?)
}

/// Resolve a group name to its id, creating the group if it is new.
fn resolve_group(tx: &Transaction<'_>, name: Option<&str>) -> Result<Option<i64>> {
    let Some(name) = name else {
        return Ok(None);
    };
    if let Some(id) = group_id(tx, name)? {
        return Ok(Some(id));
    }
    tx.execute("INSERT INTO groups (name) VALUES (?1)", [name])?;
    debug!(group = name, "Created group on entry write");
    Ok(Some(tx.last_insert_rowid()))
}

fn insert_row(tx: &Transaction<'_>, fields: &EncryptedFields, group: Option<&str>) -> Result<i64> {
    let group_id = resolve_group(tx, group)?;
    tx.execute(
        r#"
        INSERT INTO entries (enc_title, enc_username, enc_password, enc_url, enc_notes, group_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            fields.title,
            fields.username,
            fields.password,
            fields.url,
            fields.notes,
            group_id
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

impl VaultStore for SqliteStore {
    fn create_schema(&self) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;
        tx.commit()?;
        Ok(())
    }

    fn initialize(&self, meta: &MetaRecord) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;

        let existing: Option<i64> = tx
            .query_row("SELECT id FROM meta WHERE id = 1", [], |row| row.get(0))
            .optional()?;
        if existing.is_some() {
            return Err(VaultError::Storage(
                "Vault metadata already exists".to_string(),
            ));
        }

        tx.execute(
            "INSERT INTO meta (id, salt, iterations, verifier) VALUES (1, ?1, ?2, ?3)",
            params![meta.salt, meta.iterations, meta.verifier],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn read_meta(&self) -> Result<MetaRecord> {
        let conn = self.lock_conn()?;

        let row = conn
            .query_row(
                "SELECT salt, iterations, verifier FROM meta WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, Vec<u8>>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, Vec<u8>>(2)?,
                    ))
                },
            )
            .map_err(map_meta_error)?;

        let (salt, iterations, verifier) = row;
        if salt.len() < SALT_LENGTH {
            return Err(VaultError::MetadataUnreadable(format!(
                "salt is {} bytes, expected at least {}",
                salt.len(),
                SALT_LENGTH
            )));
        }
        let iterations = u32::try_from(iterations)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                VaultError::MetadataUnreadable(format!("invalid iteration count {}", iterations))
            })?;
        if verifier.len() != HMAC_LENGTH {
            return Err(VaultError::MetadataUnreadable(format!(
                "verifier is {} bytes, expected {}",
                verifier.len(),
                HMAC_LENGTH
            )));
        }

        Ok(MetaRecord {
            salt,
            iterations,
            verifier,
        })
    }

    fn insert_entry(&self, fields: &EncryptedFields, group: Option<&str>) -> Result<i64> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        let id = insert_row(&tx, fields, group)?;
        tx.commit()?;
        Ok(id)
    }

    fn insert_entries(&self, rows: &[NewRow<'_>]) -> Result<Vec<i64>> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let mut ids = Vec::with_capacity(rows.len());
        for (fields, group) in rows {
            ids.push(insert_row(&tx, fields, *group)?);
        }

        tx.commit()?;
        debug!(count = ids.len(), "Inserted entry batch");
        Ok(ids)
    }

    fn get_entry(&self, id: i64) -> Result<Option<EntryRow>> {
        let conn = self.lock_conn()?;
        let sql = format!("{} WHERE e.id = ?1", ENTRY_SELECT);
        Ok(conn.query_row(&sql, [id], read_entry_row).optional()?)
    }

    fn list_entries(&self) -> Result<Vec<EntryRow>> {
        let conn = self.lock_conn()?;
        let sql = format!("{} ORDER BY e.id ASC", ENTRY_SELECT);

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_entry_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn update_entry(&self, id: i64, fields: &EncryptedFields, group: Option<&str>) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let group_id = resolve_group(&tx, group)?;
        let updated = tx.execute(
            r#"
            UPDATE entries
            SET enc_title = ?1, enc_username = ?2, enc_password = ?3,
                enc_url = ?4, enc_notes = ?5, group_id = ?6
            WHERE id = ?7
            "#,
            params![
                fields.title,
                fields.username,
                fields.password,
                fields.url,
                fields.notes,
                group_id,
                id
            ],
        )?;
        // Dropping the transaction rolls back any group created above.
        if updated == 0 {
            return Err(VaultError::EntryNotFound(id));
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_entry(&self, id: i64) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let deleted = tx.execute("DELETE FROM entries WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(VaultError::EntryNotFound(id));
        }

        tx.commit()?;
        Ok(())
    }

    fn list_groups(&self) -> Result<Vec<Group>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare("SELECT id, name FROM groups ORDER BY name, id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Group {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut groups = Vec::new();
        for row in rows {
            groups.push(row?);
        }
        Ok(groups)
    }

    fn insert_group(&self, name: &str) -> Result<i64> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        if group_id(&tx, name)?.is_some() {
            return Err(VaultError::DuplicateGroup(name.to_string()));
        }
        tx.execute("INSERT INTO groups (name) VALUES (?1)", [name])?;
        let id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(id)
    }

    fn rename_group(&self, old: &str, new: &str) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let id = group_id(&tx, old)?.ok_or_else(|| VaultError::GroupNotFound(old.to_string()))?;
        if old == new {
            return Ok(());
        }
        if group_id(&tx, new)?.is_some() {
            return Err(VaultError::DuplicateGroup(new.to_string()));
        }

        tx.execute("UPDATE groups SET name = ?1 WHERE id = ?2", params![new, id])?;

        tx.commit()?;
        debug!(from = old, to = new, "Renamed group");
        Ok(())
    }

    fn delete_group(&self, name: &str) -> Result<usize> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let id =
            group_id(&tx, name)?.ok_or_else(|| VaultError::GroupNotFound(name.to_string()))?;

        let removed = tx.execute("DELETE FROM entries WHERE group_id = ?1", [id])?;
        tx.execute("DELETE FROM groups WHERE id = ?1", [id])?;

        tx.commit()?;
        debug!(group = name, entries = removed, "Deleted group with its entries");
        Ok(removed)
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(VaultError::Storage(format!(
                "SQLite integrity check failed: {}",
                status
            )));
        }

        let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        if rows.next()?.is_some() {
            return Err(VaultError::Storage(
                "Foreign key integrity check failed".to_string(),
            ));
        }

        let meta_rows: i64 = conn.query_row("SELECT COUNT(*) FROM meta", [], |row| row.get(0))?;
        if meta_rows != 1 {
            return Err(VaultError::Storage(format!(
                "Expected exactly one metadata row, found {}",
                meta_rows
            )));
        }

        Ok(())
    }

    fn backup_to(&self, dest: &Path) -> Result<()> {
        if self.path.as_deref() == Some(dest) {
            return Err(VaultError::InvalidInput(
                "Backup destination is the vault file itself".to_string(),
            ));
        }

        crate::fs::ensure_parent_dir(dest)?;
        let temp_path = crate::fs::temp_sibling(dest)?;
        let temp_str = temp_path.to_str().ok_or_else(|| {
            VaultError::InvalidInput("Backup path must be valid UTF-8".to_string())
        })?;

        {
            let conn = self.lock_conn()?;
            if let Err(e) = conn.execute("VACUUM INTO ?1", [temp_str]) {
                let _ = fs::remove_file(&temp_path);
                return Err(e.into());
            }
        }

        File::open(&temp_path)
            .and_then(|file| file.sync_all())
            .map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                VaultError::Storage(format!("Backup sync failed: {}", e))
            })?;

        crate::fs::rename_with_fallback(&temp_path, dest)
            .map_err(|e| VaultError::Storage(format!("Backup rename failed: {}", e)))?;

        Ok(())
    }
}
