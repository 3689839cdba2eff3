//! Index health: which recorded snippets still exist on disk.

use serde::Serialize;
use snip_fs::NormalizedPath;

use crate::index::RecordStore;

/// State of one index entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordStatus {
    pub key: String,
    pub location: String,
    /// Whether the snippet file exists under the run root.
    pub exists: bool,
    /// Whether the key follows the `{collection}_{file}_{start}_{end}` form.
    pub valid_key: bool,
}

/// Inspect every record of `records`, resolving locations against `root`.
pub fn record_status(root: &NormalizedPath, records: &RecordStore) -> Vec<RecordStatus> {
    records
        .iter()
        .map(|(key, location)| RecordStatus {
            key: key.to_string(),
            location: location.to_string(),
            exists: NormalizedPath::new(location).resolve_against(root).is_file(),
            valid_key: crate::key::IdentityKey::parse(key).is_some(),
        })
        .collect()
}
