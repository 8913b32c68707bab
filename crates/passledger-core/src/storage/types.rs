//! Raw data types for the storage layer.
//!
//! Field values here are envelopes (`IV || ciphertext`), never plaintext.

/// The singleton metadata row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaRecord {
    /// Random salt generated once at vault creation
    pub salt: Vec<u8>,

    /// PBKDF2 iteration count fixed at vault creation
    pub iterations: u32,

    /// `HMAC(key, "verifier")`
    pub verifier: Vec<u8>,
}

/// The five encrypted text fields of one entry.
///
/// `url` and `notes` are `None` when the field is absent; an encrypted empty
/// string is stored as `Some(envelope)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedFields {
    pub title: Vec<u8>,
    pub username: Vec<u8>,
    pub password: Vec<u8>,
    pub url: Option<Vec<u8>>,
    pub notes: Option<Vec<u8>>,
}

/// One entry to insert: its envelopes and the validated group name, if any.
pub type NewRow<'a> = (EncryptedFields, Option<&'a str>);

/// An entry row as stored, with its group resolved to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub id: i64,
    pub fields: EncryptedFields,
    pub group: Option<String>,
}

/// A group row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub name: String,
}
