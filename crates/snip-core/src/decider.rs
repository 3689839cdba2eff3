//! Decisions the engine delegates to its caller.
//!
//! Interactive front ends implement [`Decider`] with prompts; batch runs use
//! [`AutoDecider`].

use crate::key::{DocumentId, IdentityKey};
use crate::metadata::MetadataEntry;
use snip_fs::NormalizedPath;

/// A low-confidence match awaiting an update/skip decision.
#[derive(Debug, Clone, Copy)]
pub struct AmbiguousMatch<'a> {
    pub document: &'a DocumentId,
    /// Key the block was extracted under.
    pub candidate: &'a IdentityKey,
    /// Key of the same-span record that might be its predecessor.
    pub existing: &'a IdentityKey,
    pub location: &'a NormalizedPath,
    /// Start distance in significant lines.
    pub distance: usize,
    pub content: &'a str,
}

/// A block with no predecessor that needs a name.
#[derive(Debug, Clone, Copy)]
pub struct NewSnippet<'a> {
    pub document: &'a DocumentId,
    pub key: &'a IdentityKey,
    pub declared_name: Option<&'a str>,
    pub defaults: Option<&'a MetadataEntry>,
    pub content: &'a str,
}

/// Caller-supplied description of a new snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetDescription {
    pub name: String,
    pub group: String,
    pub description: String,
}

pub trait Decider {
    /// Whether the ambiguous record should be updated with the block.
    fn confirm_update(&mut self, candidate: &AmbiguousMatch<'_>) -> bool;

    /// Name and describe a new snippet. `None` (or an empty name) skips it.
    fn describe(&mut self, snippet: &NewSnippet<'_>) -> Option<SnippetDescription>;
}

/// Non-interactive decisions.
///
/// Ambiguous matches are declined unless `accept_ambiguous` is set. New
/// snippets take their declared name and metadata defaults; undeclared
/// blocks are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecider {
    pub accept_ambiguous: bool,
}

impl AutoDecider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepting_ambiguous() -> Self {
        Self {
            accept_ambiguous: true,
        }
    }
}

impl Decider for AutoDecider {
    fn confirm_update(&mut self, candidate: &AmbiguousMatch<'_>) -> bool {
        tracing::debug!(
            candidate = %candidate.candidate,
            existing = %candidate.existing,
            accept = self.accept_ambiguous,
            "Auto-deciding ambiguous match"
        );
        self.accept_ambiguous
    }

    fn describe(&mut self, snippet: &NewSnippet<'_>) -> Option<SnippetDescription> {
        let name = snippet.declared_name?;
        let defaults = snippet.defaults.cloned().unwrap_or_default();
        Some(SnippetDescription {
            name: name.to_string(),
            group: defaults.group,
            description: defaults.description,
        })
    }
}
