//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table as ComfyTable};

use super::mode::OutputMode;

/// Render a key-value pair.
///
/// Pretty mode: "Key: value"
/// Plain mode: "key=value"
pub fn kv(mode: OutputMode, key: &str, value: &str) -> String {
    if mode.is_pretty() {
        format!("{}: {}", key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(mode: OutputMode, text: &str) -> String {
    if mode.is_pretty() {
        format!("Hint: {}", text)
    } else {
        format!("hint={}", text)
    }
}

/// Column definition for table rendering.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render rows as a table.
///
/// Pretty mode: bordered comfy-table with a header row
/// Plain mode: tab-separated values, no header
pub fn table(mode: OutputMode, columns: &[Column], rows: &[Vec<String>]) -> String {
    if mode.is_pretty() {
        let mut table = ComfyTable::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(columns.iter().map(|c| c.header));
        for row in rows {
            table.add_row(row);
        }
        table.to_string()
    } else {
        rows.iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(OutputMode::Pretty, "User Name", "bob"), "User Name: bob");
        assert_eq!(kv(OutputMode::Plain, "User Name", "bob"), "user_name=bob");
    }

    #[test]
    fn test_plain_table_is_tab_separated() {
        let rows = vec![
            vec!["1".to_string(), "Bank".to_string()],
            vec!["2".to_string(), "Mail".to_string()],
        ];
        let out = table(OutputMode::Plain, &[Column::new("ID"), Column::new("TITLE")], &rows);
        assert_eq!(out, "1\tBank\n2\tMail");
    }

    #[test]
    fn test_pretty_table_has_header() {
        let rows = vec![vec!["1".to_string(), "Bank".to_string()]];
        let out = table(OutputMode::Pretty, &[Column::new("ID"), Column::new("TITLE")], &rows);
        assert!(out.contains("TITLE"));
        assert!(out.contains("Bank"));
    }
}
