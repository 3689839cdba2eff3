//! Identity resolution: deciding what a freshly extracted block is.
//!
//! Tiers are tried in a fixed order and the first one that decides wins:
//!
//! 1. **Content**: a record of the same document whose stored snippet has the
//!    same canonical content (comments and whitespace ignored).
//! 2. **Exact key**: a record with the candidate's identity key.
//! 3. **Proximate**: a record with the same span whose start lies within the
//!    proximity threshold. A same-span record further away is only a
//!    low-confidence match and is handed back as [`Resolution::Ambiguous`].
//! 4. Otherwise the block is new.
//!
//! The resolver never prompts and never writes. Callers act on the returned
//! [`Resolution`].

use crate::index::Record;
use crate::key::{DocumentId, IdentityKey};
use crate::metadata::{MetadataEntry, MetadataStore};
use crate::output::SnippetReader;
use snip_blocks::{Block, fingerprint};
use snip_fs::NormalizedPath;
use std::fmt;

/// Default maximum start distance, in significant lines, for tier 3.
pub const DEFAULT_PROXIMITY: usize = 30;

/// Which tier produced an update decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    Content,
    ExactKey,
    Proximate,
    /// A low-confidence proximate match accepted by the caller.
    Confirmed,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Content => "content",
            Self::ExactKey => "exact key",
            Self::Proximate => "proximity",
            Self::Confirmed => "confirmed",
        };
        f.write_str(label)
    }
}

/// Outcome of resolving one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Overwrite the record currently stored under `key`.
    Update {
        key: IdentityKey,
        location: NormalizedPath,
        tier: MatchTier,
    },
    /// Same-span record too far away to accept without a decision.
    Ambiguous {
        key: IdentityKey,
        location: NormalizedPath,
        distance: usize,
    },
    /// No predecessor. `defaults` come from metadata for the declared name.
    Create { defaults: Option<MetadataEntry> },
}

/// A block together with the identity it was extracted under.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub document: &'a DocumentId,
    pub key: &'a IdentityKey,
    pub block: &'a Block,
}

#[derive(Debug, Clone, Copy)]
pub struct IdentityResolver {
    proximity: usize,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PROXIMITY)
    }
}

impl IdentityResolver {
    pub fn new(proximity: usize) -> Self {
        Self { proximity }
    }

    pub fn proximity(&self) -> usize {
        self.proximity
    }

    /// Resolve `candidate` against `existing`.
    ///
    /// `existing` must already be restricted to records of the candidate's
    /// document; its order is the tie-break order for every tier.
    pub fn resolve<R: SnippetReader + ?Sized>(
        &self,
        candidate: &Candidate<'_>,
        existing: &[Record],
        reader: &R,
        metadata: &MetadataStore,
    ) -> Resolution {
        if let Some(resolution) = self.match_content(candidate, existing, reader) {
            return resolution;
        }

        if let Some(record) = existing.iter().find(|r| &r.key == candidate.key) {
            return update(record, MatchTier::ExactKey);
        }

        if let Some(resolution) = self.match_proximate(candidate, existing) {
            return resolution;
        }

        let defaults = candidate
            .block
            .name
            .as_deref()
            .and_then(|name| metadata.get(&candidate.document.collection, name))
            .cloned();
        Resolution::Create { defaults }
    }

    fn match_content<R: SnippetReader + ?Sized>(
        &self,
        candidate: &Candidate<'_>,
        existing: &[Record],
        reader: &R,
    ) -> Option<Resolution> {
        let wanted = fingerprint(&candidate.block.content);
        let mut first_match = None;

        for record in existing {
            let stored = match reader.read_snippet(&record.location) {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::debug!(key = %record.key, error = %e, "Stored snippet unreadable, skipping content check");
                    continue;
                }
            };
            if fingerprint(&stored) != wanted {
                continue;
            }
            // Same content under the same key needs no relocation.
            if &record.key == candidate.key {
                return Some(update(record, MatchTier::ExactKey));
            }
            first_match.get_or_insert(record);
        }

        first_match.map(|record| update(record, MatchTier::Content))
    }

    fn match_proximate(&self, candidate: &Candidate<'_>, existing: &[Record]) -> Option<Resolution> {
        let span = candidate.key.span();
        let start = candidate.key.start();
        let same_span = || existing.iter().filter(move |r| r.key.span() == span);

        if let Some(record) = same_span().find(|r| r.key.start().abs_diff(start) <= self.proximity) {
            return Some(update(record, MatchTier::Proximate));
        }

        same_span().next().map(|record| Resolution::Ambiguous {
            key: record.key.clone(),
            location: record.location.clone(),
            distance: record.key.start().abs_diff(start),
        })
    }
}

fn update(record: &Record, tier: MatchTier) -> Resolution {
    Resolution::Update {
        key: record.key.clone(),
        location: record.location.clone(),
        tier,
    }
}
