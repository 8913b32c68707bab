//! Decrypted entry types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown instead of a hidden password.
const PASSWORD_MASK: &str = "********";

/// A decrypted entry as returned by the vault.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Immutable, monotonically assigned id
    pub id: i64,
    pub title: String,
    pub username: String,
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Group name, unencrypted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Entry {
    /// The password for display with visibility toggled off.
    pub fn masked_password(&self) -> &'static str {
        if self.password.is_empty() {
            ""
        } else {
            PASSWORD_MASK
        }
    }

    /// Convert back into an insertable entry (used by import).
    pub fn into_new(self) -> NewEntry {
        NewEntry {
            title: self.title,
            username: self.username,
            password: self.password,
            url: self.url,
            notes: self.notes,
            group: self.group,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &self.notes.as_ref().map(|_| "[REDACTED]"))
            .field("group", &self.group)
            .finish()
    }
}

/// Builder for creating new entries.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub username: String,
    pub password: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub group: Option<String>,
}

impl NewEntry {
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Attach the id assigned by the store.
    pub fn into_entry(self, id: i64) -> Entry {
        Entry {
            id,
            title: self.title,
            username: self.username,
            password: self.password,
            url: self.url,
            notes: self.notes,
            group: self.group,
        }
    }
}

impl fmt::Debug for NewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEntry")
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("url", &self.url)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_password() {
        let entry = NewEntry::new("Google", "u@gmail.com", "secret").into_entry(1);
        assert_eq!(entry.masked_password(), "********");

        let empty = NewEntry::new("Note", "", "").into_entry(2);
        assert_eq!(empty.masked_password(), "");
    }

    #[test]
    fn test_debug_redacts_password() {
        let entry = NewEntry::new("Google", "u@gmail.com", "hunter2")
            .with_notes("pin 1234")
            .into_entry(1);
        let output = format!("{:?}", entry);

        assert!(output.contains("Google"));
        assert!(!output.contains("hunter2"));
        assert!(!output.contains("pin 1234"));
        assert!(!format!("{:?}", entry.into_new()).contains("hunter2"));
    }

    #[test]
    fn test_json_omits_absent_optionals() {
        let entry = NewEntry::new("Google", "u", "p").into_entry(3);
        let value = serde_json::to_value(&entry).unwrap();

        assert!(value.get("url").is_none());
        assert_eq!(value["title"], "Google");

        let parsed: NewEntry =
            serde_json::from_str(r#"{"title":"a","username":"b","password":"c"}"#).unwrap();
        assert_eq!(parsed.url, None);
        assert_eq!(parsed.group, None);
    }
}
