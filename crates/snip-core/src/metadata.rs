//! Descriptive metadata keyed by collection and declared snippet name.
//!
//! Persisted as `{"<collection>": {"<name>": {"group": ..., "description": ...}}}`.
//! Entries are independent of position and only seed the defaults offered
//! when a new snippet is described.

use crate::index::load_or_default;
use crate::Result;
use serde::{Deserialize, Serialize};
use snip_fs::{ConfigStore, NormalizedPath};
use std::collections::BTreeMap;

/// Grouping and description remembered for a declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataStore {
    collections: BTreeMap<String, BTreeMap<String, MetadataEntry>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load metadata, treating a missing or corrupt file as empty.
    pub fn load(path: &NormalizedPath) -> Self {
        load_or_default(path, "metadata")
    }

    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    pub fn get(&self, collection: &str, name: &str) -> Option<&MetadataEntry> {
        self.collections.get(collection)?.get(name)
    }

    pub fn set(&mut self, collection: &str, name: &str, entry: MetadataEntry) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(name.to_string(), entry);
    }

    pub fn is_empty(&self) -> bool {
        self.collections.values().all(BTreeMap::is_empty)
    }
}
