//! Row mapping for entry queries.

use rusqlite::Row;

use crate::storage::types::{EncryptedFields, EntryRow};

/// Column list shared by every entry query; pairs with [`read_entry_row`].
pub(super) const ENTRY_SELECT: &str = r#"
    SELECT e.id, e.enc_title, e.enc_username, e.enc_password, e.enc_url, e.enc_notes, g.name
    FROM entries e
    LEFT JOIN groups g ON g.id = e.group_id
"#;

/// Map one row selected with [`ENTRY_SELECT`].
pub(super) fn read_entry_row(row: &Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok(EntryRow {
        id: row.get(0)?,
        fields: EncryptedFields {
            title: row.get(1)?,
            username: row.get(2)?,
            password: row.get(3)?,
            url: row.get(4)?,
            notes: row.get(5)?,
        },
        group: row.get(6)?,
    })
}
