//! CSV and JSON interchange for `export` and `import`.
//!
//! CSV uses the header `Title,Username,Password,URL,Notes,Group`. On import
//! header names match case-insensitively and only username, password and url
//! are required; title falls back to the URL host.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use passledger_core::{Entry, NewEntry};
use serde::Serialize;

use crate::cli::ExchangeFormat;
use crate::errors::CliError;

pub const CSV_HEADERS: [&str; 6] = ["Title", "Username", "Password", "URL", "Notes", "Group"];

#[derive(Serialize)]
struct CsvRecord<'a> {
    title: &'a str,
    username: &'a str,
    password: &'a str,
    url: &'a str,
    notes: &'a str,
    group: &'a str,
}

impl<'a> From<&'a Entry> for CsvRecord<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            title: &entry.title,
            username: &entry.username,
            password: &entry.password,
            url: entry.url.as_deref().unwrap_or_default(),
            notes: entry.notes.as_deref().unwrap_or_default(),
            group: entry.group.as_deref().unwrap_or_default(),
        }
    }
}

/// Entries parsed from an import file.
#[derive(Debug)]
pub struct ParsedImport {
    pub entries: Vec<NewEntry>,
    /// CSV rows dropped for missing columns or empty required fields
    pub skipped: usize,
}

pub fn write_entries<W: Write>(
    format: ExchangeFormat,
    entries: &[Entry],
    mut writer: W,
) -> anyhow::Result<()> {
    match format {
        ExchangeFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.write_all(b"\n")?;
        }
        ExchangeFormat::Csv => {
            let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
            csv.write_record(CSV_HEADERS)?;
            for entry in entries {
                csv.serialize(CsvRecord::from(entry))?;
            }
            csv.flush()?;
        }
    }
    Ok(())
}

pub fn read_entries<R: Read>(format: ExchangeFormat, reader: R) -> Result<ParsedImport, CliError> {
    match format {
        ExchangeFormat::Json => {
            let entries: Vec<NewEntry> = serde_json::from_reader(reader)
                .map_err(|e| CliError::invalid_input(format!("Invalid JSON import: {}", e)))?;
            Ok(ParsedImport {
                entries,
                skipped: 0,
            })
        }
        ExchangeFormat::Csv => read_csv(reader),
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, PartialEq, Eq)]
struct Columns {
    title: Option<usize>,
    username: usize,
    password: usize,
    url: usize,
    notes: Option<usize>,
    group: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, CliError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        match (find("username"), find("password"), find("url")) {
            (Some(username), Some(password), Some(url)) => Ok(Self {
                title: find("title"),
                username,
                password,
                url,
                notes: find("notes"),
                group: find("group"),
            }),
            _ => Err(CliError::invalid_input(
                "CSV import needs username, password and url columns",
            )),
        }
    }

    fn widest(&self) -> usize {
        [self.title, self.notes, self.group]
            .into_iter()
            .flatten()
            .chain([self.username, self.password, self.url])
            .max()
            .unwrap_or_default()
    }

    /// Build an entry from one row, or `None` if the row is incomplete.
    fn entry(&self, row: &StringRecord) -> Option<NewEntry> {
        if row.len() <= self.widest() {
            return None;
        }
        let optional = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .filter(|value| !value.is_empty())
        };

        let username = row.get(self.username)?;
        let password = row.get(self.password)?;
        let url = row.get(self.url)?;
        if username.is_empty() || password.is_empty() || url.is_empty() {
            return None;
        }
        let title = optional(self.title).unwrap_or_else(|| title_from_url(url));

        let mut entry = NewEntry::new(title, username, password).with_url(url);
        if let Some(notes) = optional(self.notes) {
            entry = entry.with_notes(notes);
        }
        if let Some(group) = optional(self.group) {
            entry = entry.with_group(group);
        }
        Some(entry)
    }
}

fn read_csv<R: Read>(reader: R) -> Result<ParsedImport, CliError> {
    let invalid = |e: csv::Error| CliError::invalid_input(format!("Invalid CSV import: {}", e));

    let mut csv = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let columns = Columns::from_headers(csv.headers().map_err(invalid)?)?;

    let mut entries = Vec::new();
    let mut rows = 0;
    for record in csv.records() {
        let record = record.map_err(invalid)?;
        rows += 1;
        if let Some(entry) = columns.entry(&record) {
            entries.push(entry);
        }
    }
    if rows == 0 {
        return Err(CliError::invalid_input(
            "CSV import needs a header row and at least one data row",
        ));
    }

    Ok(ParsedImport {
        skipped: rows - entries.len(),
        entries,
    })
}

/// Host part of a URL, used as the title when a row has none.
fn title_from_url(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.split('/').next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> ParsedImport {
        read_entries(ExchangeFormat::Csv, csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_title_from_url() {
        assert_eq!(title_from_url("https://github.com/login"), "github.com");
        assert_eq!(title_from_url("http://example.org"), "example.org");
        assert_eq!(title_from_url("intranet/wiki"), "intranet");
    }

    #[test]
    fn test_headers_any_case_and_order() {
        let parsed = parse(
            "url,PASSWORD,UserName,Group,notes\n\
             https://bank.example/login, pin ,alice,Finance,\n",
        );
        assert_eq!(parsed.skipped, 0);
        let entry = &parsed.entries[0];
        assert_eq!(entry.title, "bank.example");
        assert_eq!(entry.username, "alice");
        assert_eq!(entry.password, "pin");
        assert_eq!(entry.group.as_deref(), Some("Finance"));
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn test_incomplete_rows_skipped() {
        let parsed = parse(
            "Title,Username,Password,URL\n\
             Mail,bob,letmein,https://mail.example\n\
             NoPass,bob,,https://x.example\n\
             Short,bob\n",
        );
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].title, "Mail");
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_missing_required_column_rejected() {
        let result = read_entries(ExchangeFormat::Csv, "Title,Username,Password\na,b,c\n".as_bytes());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));

        let result = read_entries(ExchangeFormat::Csv, "Username,Password,URL\n".as_bytes());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_csv_export_layout() {
        let entries = vec![
            NewEntry::new("Bank", "alice", "p,w")
                .with_group("Finance")
                .into_entry(1),
            NewEntry::new("Mail", "bob", "letmein")
                .with_url("https://mail.example")
                .into_entry(2),
        ];
        let mut out = Vec::new();
        write_entries(ExchangeFormat::Csv, &entries, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Title,Username,Password,URL,Notes,Group");
        assert_eq!(lines[1], "Bank,alice,\"p,w\",,,Finance");
        assert_eq!(lines[2], "Mail,bob,letmein,https://mail.example,,");
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let mut out = Vec::new();
        write_entries(ExchangeFormat::Csv, &[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Title,Username,Password,URL,Notes,Group\n");
    }
}
