//! The vault facade.
//!
//! A [`Vault`] is one open, authenticated session. It owns the derived key
//! for its whole lifetime and is the only place where fields cross between
//! plaintext and envelopes:
//!
//! ```text
//! open_or_create ──► derive key once ──► Vault { store, key }
//!   save/update  ──► encrypt 5 fields ──► store row
//!   load         ◄── decrypt 5 fields ◄── store rows (fail closed)
//! ```
//!
//! There is no partially open state: construction either returns a usable
//! handle or an error. Dropping the handle (or calling [`Vault::close`])
//! zeroes the key.

mod entry;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::crypto::{
    compute_verifier, decrypt, derive_key, encrypt, generate_salt, validate_passphrase,
    verify_password, VaultKey,
};
use crate::error::{Result, VaultError};
use crate::storage::{EncryptedFields, EntryRow, MetaRecord, NewRow, SqliteStore, VaultStore};

pub use entry::{Entry, NewEntry};

/// PBKDF2 iteration count for newly created vaults.
pub const DEFAULT_ITERATIONS: u32 = 20_000;

/// Display name meaning "every group"; never stored as a group.
pub const RESERVED_GROUP_NAME: &str = "All";

/// Options consulted only when a new vault is created.
///
/// Opening an existing vault always uses the iteration count stored in its
/// metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultOptions {
    pub iterations: u32,
}

impl Default for VaultOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Summary returned by a successful integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityReport {
    pub entries: usize,
    pub groups: usize,
}

/// One open vault session.
pub struct Vault<S: VaultStore = SqliteStore> {
    store: S,
    key: VaultKey,
    meta: MetaRecord,
}

impl Vault<SqliteStore> {
    /// Open the vault at `path`, creating it with default options if the file
    /// is missing or empty.
    ///
    /// # Errors
    ///
    /// - `VaultError::AuthenticationFailed` on a wrong password
    /// - `VaultError::MetadataUnreadable` if the file exists but has no valid
    ///   metadata
    /// - `VaultError::InvalidInput` if creating with an empty password
    /// - `VaultError::Storage` on I/O failure
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use passledger_core::{NewEntry, Vault};
    ///
    /// let vault = Vault::open_or_create(Path::new("passwords.db"), "pw1")?;
    /// vault.save_entry(&NewEntry::new("Google", "u@gmail.com", "secret"))?;
    /// vault.close();
    /// # Ok::<(), passledger_core::VaultError>(())
    /// ```
    pub fn open_or_create(path: &Path, password: &str) -> Result<Self> {
        Self::open_or_create_with(path, password, &VaultOptions::default())
    }

    /// Like [`Vault::open_or_create`], with explicit creation options.
    pub fn open_or_create_with(path: &Path, password: &str, options: &VaultOptions) -> Result<Self> {
        if !crate::fs::is_new_vault(path)? {
            let store = SqliteStore::open(path)?;
            let vault = Self::authenticate(store, password)?;
            info!(path = %path.display(), "Opened vault");
            return Ok(vault);
        }

        validate_passphrase(password)?;
        validate_options(options)?;

        let existed = path.exists();
        crate::fs::ensure_parent_dir(path)?;
        let store = SqliteStore::open(path)?;
        match Self::create(store, password, options) {
            Ok(vault) => {
                info!(
                    path = %path.display(),
                    iterations = options.iterations,
                    "Created vault"
                );
                Ok(vault)
            }
            Err(err) => {
                // Never leave a half-initialized file behind.
                if !existed {
                    let _ = std::fs::remove_file(path);
                }
                Err(err)
            }
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> Option<&Path> {
        self.store.path()
    }
}

fn validate_options(options: &VaultOptions) -> Result<()> {
    if options.iterations == 0 {
        return Err(VaultError::InvalidInput(
            "Iteration count must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Validate a group name for creation or as a rename target.
fn validate_group_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(VaultError::InvalidInput(
            "Group name cannot be empty".to_string(),
        ));
    }
    if name.eq_ignore_ascii_case(RESERVED_GROUP_NAME) {
        return Err(VaultError::InvalidInput(format!(
            "'{}' is reserved and cannot be used as a group name",
            RESERVED_GROUP_NAME
        )));
    }
    Ok(name)
}

/// Normalize the group attached to an entry; blank means no group.
fn entry_group(group: Option<&str>) -> Result<Option<&str>> {
    match group.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => validate_group_name(name).map(Some),
    }
}

/// Log fatal errors before handing them back to the caller.
fn observe<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        if err.is_fatal() {
            warn!(error = %err, "Vault storage failure; session must be closed");
        }
    }
    result
}

impl<S: VaultStore> Vault<S> {
    /// Initialize a fresh store: new salt, derived key, verifier, schema.
    pub fn create(store: S, password: &str, options: &VaultOptions) -> Result<Self> {
        validate_passphrase(password)?;
        validate_options(options)?;

        let salt = generate_salt();
        let key = derive_key(password.as_bytes(), &salt, options.iterations)?;
        let verifier = compute_verifier(&key)?;
        let meta = MetaRecord {
            salt: salt.to_vec(),
            iterations: options.iterations,
            verifier: verifier.to_vec(),
        };

        observe(store.initialize(&meta))?;

        Ok(Self { store, key, meta })
    }

    /// Authenticate against an existing store using its stored salt and
    /// iteration count.
    pub fn authenticate(store: S, password: &str) -> Result<Self> {
        let meta = observe(store.read_meta())?;
        let key = derive_key(password.as_bytes(), &meta.salt, meta.iterations)?;

        if !verify_password(&key, &meta.verifier)? {
            warn!("Vault authentication failed");
            return Err(VaultError::AuthenticationFailed);
        }

        Ok(Self { store, key, meta })
    }

    /// PBKDF2 iteration count fixed at creation.
    pub fn iterations(&self) -> u32 {
        self.meta.iterations
    }

    fn seal(
        &self,
        title: &str,
        username: &str,
        password: &str,
        url: Option<&str>,
        notes: Option<&str>,
    ) -> Result<EncryptedFields> {
        let key = &self.key.as_bytes()[..];
        let seal_opt = |value: Option<&str>| value.map(|v| encrypt(key, v.as_bytes())).transpose();

        Ok(EncryptedFields {
            title: encrypt(key, title.as_bytes())?,
            username: encrypt(key, username.as_bytes())?,
            password: encrypt(key, password.as_bytes())?,
            url: seal_opt(url)?,
            notes: seal_opt(notes)?,
        })
    }

    fn unseal(&self, row: EntryRow) -> Result<Entry> {
        let id = row.id;
        self.unseal_fields(row).map_err(|err| match err {
            VaultError::CorruptCiphertext(msg) => {
                VaultError::CorruptCiphertext(format!("entry {}: {}", id, msg))
            }
            other => other,
        })
    }

    fn unseal_fields(&self, row: EntryRow) -> Result<Entry> {
        let key = &self.key.as_bytes()[..];
        let open = |envelope: &[u8]| -> Result<String> {
            String::from_utf8(decrypt(key, envelope)?)
                .map_err(|_| VaultError::CorruptCiphertext("field is not valid UTF-8".to_string()))
        };

        let EntryRow { id, fields, group } = row;
        Ok(Entry {
            id,
            title: open(&fields.title)?,
            username: open(&fields.username)?,
            password: open(&fields.password)?,
            url: fields.url.as_deref().map(open).transpose()?,
            notes: fields.notes.as_deref().map(open).transpose()?,
            group,
        })
    }

    // --- Entry operations ---

    /// Encrypt and store a new entry, creating its group if needed.
    ///
    /// Each of the five fields gets its own envelope and IV.
    pub fn save_entry(&self, entry: &NewEntry) -> Result<i64> {
        let group = entry_group(entry.group.as_deref())?;
        let fields = self.seal(
            &entry.title,
            &entry.username,
            &entry.password,
            entry.url.as_deref(),
            entry.notes.as_deref(),
        )?;

        let id = observe(self.store.insert_entry(&fields, group))?;
        debug!(id, "Saved entry");
        Ok(id)
    }

    /// Encrypt and store several entries atomically.
    ///
    /// Every entry is validated and sealed before anything is written; a
    /// failure leaves the vault unchanged.
    ///
    /// # Returns
    ///
    /// Returns the new ids in input order.
    pub fn save_entries(&self, entries: &[NewEntry]) -> Result<Vec<i64>> {
        let mut rows: Vec<NewRow<'_>> = Vec::with_capacity(entries.len());
        for entry in entries {
            let group = entry_group(entry.group.as_deref())?;
            let fields = self.seal(
                &entry.title,
                &entry.username,
                &entry.password,
                entry.url.as_deref(),
                entry.notes.as_deref(),
            )?;
            rows.push((fields, group));
        }

        let ids = observe(self.store.insert_entries(&rows))?;
        debug!(count = ids.len(), "Saved entries");
        Ok(ids)
    }

    /// Decrypt every entry, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::CorruptCiphertext` if any single field fails to
    /// decrypt; no partial result is returned.
    pub fn load_all_entries(&self) -> Result<Vec<Entry>> {
        observe(self.store.list_entries())?
            .into_iter()
            .map(|row| self.unseal(row))
            .collect()
    }

    /// Decrypt one entry.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::EntryNotFound` if `id` does not exist.
    pub fn get_entry(&self, id: i64) -> Result<Entry> {
        let row = observe(self.store.get_entry(id))?.ok_or(VaultError::EntryNotFound(id))?;
        self.unseal(row)
    }

    /// Replace every field of an existing entry.
    ///
    /// All five fields are re-encrypted with fresh IVs, changed or not.
    pub fn update_entry(&self, entry: &Entry) -> Result<()> {
        let group = entry_group(entry.group.as_deref())?;
        let fields = self.seal(
            &entry.title,
            &entry.username,
            &entry.password,
            entry.url.as_deref(),
            entry.notes.as_deref(),
        )?;

        observe(self.store.update_entry(entry.id, &fields, group))?;
        debug!(id = entry.id, "Updated entry");
        Ok(())
    }

    pub fn delete_entry(&self, id: i64) -> Result<()> {
        observe(self.store.delete_entry(id))?;
        debug!(id, "Deleted entry");
        Ok(())
    }

    // --- Group operations ---

    /// Group names, sorted.
    pub fn list_groups(&self) -> Result<Vec<String>> {
        Ok(observe(self.store.list_groups())?
            .into_iter()
            .map(|group| group.name)
            .collect())
    }

    pub fn add_group(&self, name: &str) -> Result<()> {
        let name = validate_group_name(name)?;
        observe(self.store.insert_group(name))?;
        debug!(group = name, "Added group");
        Ok(())
    }

    /// Rename a group; every entry in it reports the new name on next load.
    pub fn rename_group(&self, old: &str, new: &str) -> Result<()> {
        let new = validate_group_name(new)?;
        observe(self.store.rename_group(old.trim(), new))
    }

    /// Delete a group together with all of its entries.
    ///
    /// # Returns
    ///
    /// Returns the number of entries removed.
    pub fn delete_group(&self, name: &str) -> Result<usize> {
        observe(self.store.delete_group(name.trim()))
    }

    // --- Maintenance operations ---

    /// Run storage integrity checks, then confirm every envelope decrypts.
    pub fn check_integrity(&self) -> Result<IntegrityReport> {
        observe(self.store.check_integrity())?;
        let entries = self.load_all_entries()?.len();
        let groups = observe(self.store.list_groups())?.len();
        Ok(IntegrityReport { entries, groups })
    }

    /// Write a consistent copy of the vault to `dest`.
    ///
    /// The copy is protected by the same master password.
    pub fn backup(&self, dest: &Path) -> Result<()> {
        observe(self.store.backup_to(dest))?;
        info!(dest = %dest.display(), "Wrote vault backup");
        Ok(())
    }

    /// End the session. The key is zeroed when the handle drops.
    pub fn close(self) {
        info!("Closed vault");
    }
}
