//! Record store: the persisted index from identity keys to snippet locations.
//!
//! The index is a flat JSON object (`{"<key>": "<location>"}`) so it stays
//! readable and diff-friendly. The file keeps keys in lexicographic order;
//! the resolver sees a document's records in line order.

use crate::key::{DocumentId, IdentityKey};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snip_fs::{ConfigStore, NormalizedPath};
use std::collections::BTreeMap;

/// One index entry with a parsed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: IdentityKey,
    pub location: NormalizedPath,
}

/// Mapping from identity key to snippet location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordStore {
    records: BTreeMap<String, String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index, falling back to an empty store when the file is
    /// missing or cannot be parsed.
    pub fn load(path: &NormalizedPath) -> Self {
        load_or_default(path, "record index")
    }

    /// Persist the full mapping atomically, creating parent directories.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        tracing::debug!(path = %path, records = self.records.len(), "Saved record index");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.records.contains_key(&key.to_string())
    }

    /// Location recorded for `key`.
    pub fn get(&self, key: &IdentityKey) -> Option<NormalizedPath> {
        self.records.get(&key.to_string()).map(NormalizedPath::new)
    }

    /// Insert or replace the location for `key`. Returns the previous one.
    pub fn upsert(&mut self, key: &IdentityKey, location: &NormalizedPath) -> Option<NormalizedPath> {
        self.records
            .insert(key.to_string(), location.as_str().to_string())
            .map(NormalizedPath::new)
    }

    /// Moves records to new keys, keeping their locations.
    ///
    /// All old keys are released before any new key is written, so records
    /// may trade keys within one call. Returns how many records moved.
    pub fn rename_keys(&mut self, renames: &[(IdentityKey, IdentityKey)]) -> usize {
        let moved: Vec<(&IdentityKey, String)> = renames
            .iter()
            .filter_map(|(old, new)| self.records.remove(&old.to_string()).map(|location| (new, location)))
            .collect();
        let count = moved.len();
        for (new, location) in moved {
            if let Some(replaced) = self.records.insert(new.to_string(), location) {
                tracing::warn!(key = %new, location = %replaced, "Replaced record occupying the new key");
            }
        }
        count
    }

    pub fn remove(&mut self, key: &IdentityKey) -> Option<NormalizedPath> {
        self.records.remove(&key.to_string()).map(NormalizedPath::new)
    }

    /// All records belonging to `document`, ordered by start then end line.
    ///
    /// Keys that cannot be parsed are skipped but never dropped from the
    /// store.
    pub fn records_for(&self, document: &DocumentId) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .records
            .iter()
            .filter_map(|(key, location)| {
                let key = IdentityKey::parse(key)?;
                key.belongs_to(document).then(|| Record {
                    key,
                    location: NormalizedPath::new(location),
                })
            })
            .collect();
        records.sort_by(|a, b| a.key.cmp(&b.key));
        records
    }

    /// Whether any record other than `except` points at `location`.
    pub fn location_in_use(&self, location: &NormalizedPath, except: Option<&IdentityKey>) -> bool {
        let except = except.map(IdentityKey::to_string);
        self.records
            .iter()
            .any(|(key, loc)| loc == location.as_str() && Some(key) != except.as_ref())
    }

    /// Raw `(key, location)` pairs in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub(crate) fn load_or_default<T: DeserializeOwned + Default>(path: &NormalizedPath, what: &str) -> T {
    match ConfigStore::new().load(path) {
        Ok(value) => value,
        Err(e) if e.is_not_found() => {
            tracing::debug!(path = %path, "No {} found, starting empty", what);
            T::default()
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Could not read {}, starting empty", what);
            T::default()
        }
    }
}
