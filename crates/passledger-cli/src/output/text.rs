//! Text and table output formatting for entries.

use passledger_core::Entry;

use crate::ui::{kv, table, Column, OutputMode};

const LIST_COLUMNS: [Column; 6] = [
    Column::new("ID"),
    Column::new("TITLE"),
    Column::new("USERNAME"),
    Column::new("PASSWORD"),
    Column::new("URL"),
    Column::new("GROUP"),
];

fn shown_password(entry: &Entry, reveal: bool) -> &str {
    if reveal {
        &entry.password
    } else {
        entry.masked_password()
    }
}

/// Print entries as a table (pretty) or tab-separated rows (plain).
pub fn print_entry_list(mode: OutputMode, entries: &[Entry], reveal: bool) {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            vec![
                entry.id.to_string(),
                entry.title.clone(),
                entry.username.clone(),
                shown_password(entry, reveal).to_string(),
                entry.url.clone().unwrap_or_default(),
                entry.group.clone().unwrap_or_default(),
            ]
        })
        .collect();
    if rows.is_empty() {
        if mode.is_pretty() {
            println!("No entries.");
        }
        return;
    }
    println!("{}", table(mode, &LIST_COLUMNS, &rows));
}

/// Print one entry as key-value lines.
pub fn print_entry(mode: OutputMode, entry: &Entry, reveal: bool) {
    println!("{}", kv(mode, "ID", &entry.id.to_string()));
    println!("{}", kv(mode, "Title", &entry.title));
    println!("{}", kv(mode, "Username", &entry.username));
    println!("{}", kv(mode, "Password", shown_password(entry, reveal)));
    if let Some(url) = &entry.url {
        println!("{}", kv(mode, "URL", url));
    }
    if let Some(group) = &entry.group {
        println!("{}", kv(mode, "Group", group));
    }
    if let Some(notes) = &entry.notes {
        if mode.is_pretty() {
            println!("Notes:");
            for line in notes.lines() {
                println!("  {}", line);
            }
        } else {
            println!("{}", kv(mode, "Notes", &notes.replace('\n', "\\n")));
        }
    }
}

/// Print group names, one per line.
pub fn print_groups(groups: &[String]) {
    for group in groups {
        println!("{}", group);
    }
}
