//! JSON output formatting for entries.

use passledger_core::Entry;

/// Convert an entry to JSON for output; the password is masked unless `reveal`.
pub fn entry_json(entry: &Entry, reveal: bool) -> serde_json::Value {
    let password = if reveal {
        entry.password.as_str()
    } else {
        entry.masked_password()
    };
    serde_json::json!({
        "id": entry.id,
        "title": entry.title,
        "username": entry.username,
        "password": password,
        "url": entry.url,
        "notes": entry.notes,
        "group": entry.group,
    })
}

/// Convert multiple entries to JSON array for output.
pub fn entries_json(entries: &[Entry], reveal: bool) -> Vec<serde_json::Value> {
    entries
        .iter()
        .map(|entry| entry_json(entry, reveal))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use passledger_core::NewEntry;

    #[test]
    fn test_password_masked_unless_revealed() {
        let entry = NewEntry::new("Bank", "alice", "hunter2").into_entry(1);
        assert_eq!(entry_json(&entry, false)["password"], "********");
        assert_eq!(entry_json(&entry, true)["password"], "hunter2");
    }

    #[test]
    fn test_absent_fields_are_null() {
        let entry = NewEntry::new("Bank", "alice", "pw").into_entry(3);
        let value = entry_json(&entry, false);
        assert!(value["url"].is_null());
        assert!(value["group"].is_null());
        assert_eq!(value["id"], 3);
    }
}
