//! Storage abstraction for PassLedger.
//!
//! This module defines the `VaultStore` trait and the raw row types that
//! cross it. A store only ever sees envelopes: encryption and decryption
//! happen one layer up in [`crate::vault`].
//!
//! ## Schema
//!
//! - `meta`: exactly one row holding salt, iteration count and verifier
//! - `groups`: unique group names
//! - `entries`: five encrypted fields plus a nullable `group_id` foreign key
//!
//! Every mutating operation runs in its own transaction, so a cascading group
//! rename or delete either fully applies or leaves the file untouched.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
pub use traits::VaultStore;
pub use types::{EncryptedFields, EntryRow, Group, MetaRecord, NewRow};
