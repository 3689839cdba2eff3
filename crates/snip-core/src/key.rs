//! Document identity and position-derived identity keys.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Identifies one scanned source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId {
    /// Configured collection (theme) name.
    pub collection: String,
    /// File name of the source, without directories.
    pub file: String,
}

impl DocumentId {
    pub fn new(collection: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            file: file.into(),
        }
    }

    /// Key prefix shared by every record of this document.
    pub fn key_prefix(&self) -> String {
        format!("{}_{}", self.collection, self.file)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.file)
    }
}

/// Position-derived key of a block: `{collection}_{file}_{start}_{end}`.
///
/// Start and end are significant-line numbers. Collection and file names may
/// themselves contain underscores, so a parsed key only keeps the document
/// prefix as a whole and compares it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    prefix: String,
    start: usize,
    end: usize,
}

impl IdentityKey {
    pub fn new(document: &DocumentId, start: usize, end: usize) -> Self {
        Self {
            prefix: document.key_prefix(),
            start,
            end,
        }
    }

    /// Parse a persisted key, returning `None` when it is malformed.
    pub fn parse(key: &str) -> Option<Self> {
        let mut parts = key.rsplitn(3, '_');
        let end = parts.next()?.parse().ok()?;
        let start = parts.next()?.parse().ok()?;
        let prefix = parts.next().filter(|p| !p.is_empty())?;
        Some(Self {
            prefix: prefix.to_string(),
            start,
            end,
        })
    }

    /// The `{collection}_{file}` part of the key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Length in significant lines.
    pub fn span(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether this key was produced for `document`.
    pub fn belongs_to(&self, document: &DocumentId) -> bool {
        self.prefix == document.key_prefix()
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.prefix, self.start, self.end)
    }
}

impl FromStr for IdentityKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidKey { key: s.to_string() })
    }
}
