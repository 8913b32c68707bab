//! In-memory filtering of decrypted entries.
//!
//! Everything here is pure: the vault engine keeps no "current search" or
//! "current group" state. Callers hold a [`FilterSettings`] and apply it to
//! the output of [`crate::Vault::load_all_entries`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::vault::{Entry, RESERVED_GROUP_NAME};

/// One searchable text field of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Username,
    Url,
    Group,
    Notes,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::Title,
        SearchField::Username,
        SearchField::Url,
        SearchField::Group,
        SearchField::Notes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Username => "username",
            SearchField::Url => "url",
            SearchField::Group => "group",
            SearchField::Notes => "notes",
        }
    }

    fn value(self, entry: &Entry) -> Option<&str> {
        match self {
            SearchField::Title => Some(&entry.title),
            SearchField::Username => Some(&entry.username),
            SearchField::Url => entry.url.as_deref(),
            SearchField::Group => entry.group.as_deref(),
            SearchField::Notes => entry.notes.as_deref(),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                VaultError::InvalidInput(format!(
                    "Unknown search field '{}' (expected one of: title, username, url, group, notes)",
                    s
                ))
            })
    }
}

/// The set of fields a text query is matched against.
///
/// The default is title, username and URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFields {
    pub title: bool,
    pub username: bool,
    pub url: bool,
    pub group: bool,
    pub notes: bool,
}

impl Default for SearchFields {
    fn default() -> Self {
        Self {
            title: true,
            username: true,
            url: true,
            group: false,
            notes: false,
        }
    }
}

impl SearchFields {
    pub fn all() -> Self {
        Self {
            title: true,
            username: true,
            url: true,
            group: true,
            notes: true,
        }
    }

    pub fn none() -> Self {
        Self {
            title: false,
            username: false,
            url: false,
            group: false,
            notes: false,
        }
    }

    /// Enable exactly the given fields.
    pub fn only(fields: impl IntoIterator<Item = SearchField>) -> Self {
        fields.into_iter().fold(Self::none(), |set, field| set.with(field))
    }

    pub fn with(mut self, field: SearchField) -> Self {
        match field {
            SearchField::Title => self.title = true,
            SearchField::Username => self.username = true,
            SearchField::Url => self.url = true,
            SearchField::Group => self.group = true,
            SearchField::Notes => self.notes = true,
        }
        self
    }

    pub fn contains(&self, field: SearchField) -> bool {
        match field {
            SearchField::Title => self.title,
            SearchField::Username => self.username,
            SearchField::Url => self.url,
            SearchField::Group => self.group,
            SearchField::Notes => self.notes,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = SearchField> + '_ {
        SearchField::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

/// Whether `entry` matches an already-lowercased query in any enabled field.
fn matches(entry: &Entry, needle: &str, fields: &SearchFields) -> bool {
    fields.enabled().any(|field| {
        field
            .value(entry)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}

/// Case-insensitive substring filter over the enabled fields.
///
/// An empty query returns the input unchanged; an absent optional field
/// never matches.
pub fn filter_entries(entries: &[Entry], query: &str, fields: &SearchFields) -> Vec<Entry> {
    if query.is_empty() {
        return entries.to_vec();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| matches(entry, &needle, fields))
        .cloned()
        .collect()
}

/// Which group the caller is looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupSelection {
    /// No group restriction.
    #[default]
    All,
    Named(String),
}

impl GroupSelection {
    /// Map a display name to a selection; the reserved name means `All`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(RESERVED_GROUP_NAME) {
            GroupSelection::All
        } else {
            GroupSelection::Named(name.to_string())
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            GroupSelection::All => RESERVED_GROUP_NAME,
            GroupSelection::Named(name) => name,
        }
    }

    fn admits(&self, entry: &Entry) -> bool {
        match self {
            GroupSelection::All => true,
            GroupSelection::Named(name) => entry.group.as_deref() == Some(name.as_str()),
        }
    }
}

/// Keep only entries in the selected group.
pub fn filter_by_group(entries: &[Entry], selection: &GroupSelection) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| selection.admits(entry))
        .cloned()
        .collect()
}

/// Caller-held view state: selected group, search text and fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSettings {
    pub group: GroupSelection,
    pub query: String,
    pub fields: SearchFields,
}

impl FilterSettings {
    /// Restrict to the selected group, then apply the text query.
    pub fn apply(&self, entries: &[Entry]) -> Vec<Entry> {
        let in_group = filter_by_group(entries, &self.group);
        if self.query.is_empty() {
            return in_group;
        }
        filter_entries(&in_group, &self.query, &self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::NewEntry;

    fn sample() -> Vec<Entry> {
        vec![
            NewEntry::new("Google", "u@gmail.com", "secret")
                .with_url("https://google.com")
                .with_group("Web")
                .into_entry(1),
            NewEntry::new("Bank", "alice", "pin")
                .with_notes("Branch near GOOGLE office")
                .with_group("Finance")
                .into_entry(2),
            NewEntry::new("Router", "admin", "admin").into_entry(3),
        ]
    }

    fn ids(entries: &[Entry]) -> Vec<i64> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_empty_query_returns_input() {
        let entries = sample();
        assert_eq!(
            filter_entries(&entries, "", &SearchFields::none()),
            entries
        );
    }

    #[test]
    fn test_case_insensitive_default_fields() {
        let entries = sample();
        let found = filter_entries(&entries, "GOOGLE", &SearchFields::default());
        // Notes are not searched by default.
        assert_eq!(ids(&found), vec![1]);
    }

    #[test]
    fn test_notes_field_opt_in() {
        let entries = sample();
        let fields = SearchFields::default().with(SearchField::Notes);
        assert_eq!(ids(&filter_entries(&entries, "google", &fields)), vec![1, 2]);
    }

    #[test]
    fn test_group_field_and_absent_values() {
        let entries = sample();
        let fields = SearchFields::only([SearchField::Group]);
        assert_eq!(ids(&filter_entries(&entries, "fin", &fields)), vec![2]);
        assert!(filter_entries(&entries, "router", &fields).is_empty());
    }

    #[test]
    fn test_no_fields_matches_nothing() {
        let entries = sample();
        assert!(filter_entries(&entries, "a", &SearchFields::none()).is_empty());
    }

    #[test]
    fn test_filter_matches_definition_for_every_field_subset() {
        let entries = sample();
        for mask in 0u8..32 {
            let fields = SearchFields::only(
                SearchField::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, f)| f),
            );
            for query in ["a", "GOO", "web", "zzz"] {
                let expected: Vec<i64> = entries
                    .iter()
                    .filter(|e| {
                        fields.enabled().any(|f| {
                            f.value(e).is_some_and(|v| {
                                v.to_lowercase().contains(&query.to_lowercase())
                            })
                        })
                    })
                    .map(|e| e.id)
                    .collect();
                assert_eq!(ids(&filter_entries(&entries, query, &fields)), expected);
            }
        }
    }

    #[test]
    fn test_search_field_parse() {
        assert_eq!("URL".parse::<SearchField>().unwrap(), SearchField::Url);
        assert_eq!(" notes ".parse::<SearchField>().unwrap(), SearchField::Notes);
        assert!("password".parse::<SearchField>().is_err());
    }

    #[test]
    fn test_group_selection() {
        let entries = sample();
        assert_eq!(GroupSelection::from_name("All"), GroupSelection::All);
        assert_eq!(
            ids(&filter_by_group(&entries, &GroupSelection::All)),
            vec![1, 2, 3]
        );
        assert_eq!(
            ids(&filter_by_group(
                &entries,
                &GroupSelection::from_name("Finance")
            )),
            vec![2]
        );
    }

    #[test]
    fn test_settings_apply_group_then_query() {
        let entries = sample();
        let settings = FilterSettings {
            group: GroupSelection::Named("Web".to_string()),
            query: "google".to_string(),
            fields: SearchFields::all(),
        };
        assert_eq!(ids(&settings.apply(&entries)), vec![1]);

        let everything = FilterSettings::default();
        assert_eq!(everything.apply(&entries), entries);
    }
}
