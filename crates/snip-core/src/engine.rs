//! Extraction engine
//!
//! The [`Extractor`] owns the state of one run: the record index and
//! metadata loaded at start, the output sink, and the settings. Documents
//! are processed one at a time; every block is resolved and written before
//! the next one is looked at, and a document's index changes are applied
//! after its last block. Failures stay with the item that caused them and
//! end up in the returned reports.

use std::collections::HashSet;

use serde::Serialize;
use snip_blocks::{Block, Markers};
use snip_fs::{NormalizedPath, io};

use crate::config::{Settings, SourceConfig};
use crate::decider::{AmbiguousMatch, Decider, NewSnippet};
use crate::index::{Record, RecordStore};
use crate::key::{DocumentId, IdentityKey};
use crate::metadata::{MetadataEntry, MetadataStore};
use crate::output::{Presentation, SnippetOutput, snippet_location};
use crate::resolver::{Candidate, IdentityResolver, MatchTier, Resolution};
use crate::{Error, Result};

/// What happened to one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BlockAction {
    /// An existing record now points at this block.
    Updated {
        #[serde(serialize_with = "serialize_display")]
        tier: MatchTier,
        previous_key: String,
    },
    /// A new record was created.
    Created,
    /// Ambiguous match declined; nothing was written.
    Abandoned { existing_key: String },
    /// No name was given for a new block.
    Skipped,
    /// The block could not be recorded.
    Failed { reason: String },
}

fn serialize_display<S: serde::Serializer>(tier: &MatchTier, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.collect_str(tier)
}

/// Outcome for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockOutcome {
    pub key: String,
    pub location: Option<String>,
    #[serde(flatten)]
    pub action: BlockAction,
    /// Set when the record was updated but writing output failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_error: Option<String>,
}

/// Outcome for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub collection: String,
    pub file: String,
    pub blocks: Vec<BlockOutcome>,
    /// Records of this document not matched in this run.
    pub stale: Vec<String>,
    /// Stale keys removed from the index.
    pub pruned: Vec<String>,
}

impl DocumentReport {
    fn new(document: &DocumentId) -> Self {
        Self {
            collection: document.collection.clone(),
            file: document.file.clone(),
            blocks: Vec::new(),
            stale: Vec::new(),
            pruned: Vec::new(),
        }
    }

    fn count(&self, pred: impl Fn(&BlockAction) -> bool) -> usize {
        self.blocks.iter().filter(|b| pred(&b.action)).count()
    }

    pub fn updated(&self) -> usize {
        self.count(|a| matches!(a, BlockAction::Updated { .. }))
    }

    pub fn created(&self) -> usize {
        self.count(|a| matches!(a, BlockAction::Created))
    }

    pub fn abandoned(&self) -> usize {
        self.count(|a| matches!(a, BlockAction::Abandoned { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|a| matches!(a, BlockAction::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|a| matches!(a, BlockAction::Failed { .. }))
            + self.blocks.iter().filter(|b| b.write_error.is_some()).count()
    }
}

/// A source that could not be processed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub name: String,
    pub path: Option<String>,
    pub reason: String,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<SourceFailure>,
}

impl RunReport {
    pub fn total_blocks(&self) -> usize {
        self.documents.iter().map(|d| d.blocks.len()).sum()
    }
}

/// Options for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Remove stale records of processed documents from the index.
    pub prune: bool,
}

/// Index change a block asks for once its document is done.
enum IndexChange {
    None,
    /// Move the record stored under this key to the block's key.
    Rename(IdentityKey),
    /// Record a new location under the block's key.
    Insert(NormalizedPath),
}

struct BlockStep {
    outcome: BlockOutcome,
    change: IndexChange,
}

impl BlockStep {
    fn unrecorded(outcome: BlockOutcome) -> Self {
        Self {
            outcome,
            change: IndexChange::None,
        }
    }
}

/// Explicit context for one extraction run.
pub struct Extractor<O> {
    root: NormalizedPath,
    settings: Settings,
    markers: Markers,
    resolver: IdentityResolver,
    records: RecordStore,
    metadata: MetadataStore,
    output: O,
}

impl<O: SnippetOutput> Extractor<O> {
    /// Create an extractor over already loaded state.
    ///
    /// # Errors
    /// Returns an error if the configured marker cannot form delimiters.
    pub fn new(
        root: impl Into<NormalizedPath>,
        settings: Settings,
        records: RecordStore,
        metadata: MetadataStore,
        output: O,
    ) -> Result<Self> {
        let markers = Markers::new(&settings.marker)?;
        let resolver = IdentityResolver::new(settings.proximity);
        tracing::debug!(
            marker = markers.tag(),
            proximity = resolver.proximity(),
            records = records.len(),
            "Extractor ready"
        );
        Ok(Self {
            root: root.into(),
            settings,
            markers,
            resolver,
            records,
            metadata,
            output,
        })
    }

    /// Create an extractor, loading the index and metadata from the output
    /// directory under `root`. Missing or corrupt state starts empty.
    pub fn open(root: impl Into<NormalizedPath>, settings: Settings, output: O) -> Result<Self> {
        let root = root.into();
        let records = RecordStore::load(&settings.index_path().resolve_against(&root));
        let metadata = MetadataStore::load(&settings.metadata_path().resolve_against(&root));
        tracing::debug!(records = records.len(), "Loaded state");
        Self::new(root, settings, records, metadata, output)
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process every source, isolating failures per source.
    pub fn run(
        &mut self,
        sources: &[SourceConfig],
        decider: &mut dyn Decider,
        options: RunOptions,
    ) -> RunReport {
        let mut report = RunReport::default();

        for source in sources {
            match self.process_source(source, decider) {
                Ok(mut document) => {
                    if options.prune {
                        self.prune(&mut document);
                    }
                    report.documents.push(document);
                }
                Err(e) => {
                    tracing::warn!(source = %source.name, error = %e, "Skipping source");
                    report.failures.push(SourceFailure {
                        name: source.name.clone(),
                        path: source.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Read one configured source from disk and process it.
    pub fn process_source(
        &mut self,
        source: &SourceConfig,
        decider: &mut dyn Decider,
    ) -> Result<DocumentReport> {
        let path = source.source_path()?.resolve_against(&self.root);
        let text = io::read_text(&path)?;
        self.process_document(source, &text, decider)
    }

    /// Extract and reconcile every block of `text`.
    ///
    /// Blocks are resolved against the document's records as they were when
    /// the scan started; index changes are applied once every block has been
    /// seen, so blocks trading places never overwrite each other's records.
    pub fn process_document(
        &mut self,
        source: &SourceConfig,
        text: &str,
        decider: &mut dyn Decider,
    ) -> Result<DocumentReport> {
        let document = source.document_id()?;
        let mut report = DocumentReport::new(&document);
        let snapshot = self.records.records_for(&document);
        // Keys of snapshot records already matched in this scan
        let mut claimed: HashSet<IdentityKey> = HashSet::new();
        let mut renames: Vec<(IdentityKey, IdentityKey)> = Vec::new();
        let mut inserts: Vec<(IdentityKey, NormalizedPath)> = Vec::new();

        let markers = self.markers.clone();
        for block in markers.blocks(text) {
            let key = IdentityKey::new(&document, block.start_line, block.end_line);
            let existing: Vec<Record> = snapshot
                .iter()
                .filter(|r| !claimed.contains(&r.key))
                .cloned()
                .collect();
            let step = self.process_block(source, &document, &key, &block, &existing, decider);
            match step.change {
                IndexChange::Rename(previous) => {
                    claimed.insert(previous.clone());
                    renames.push((previous, key));
                }
                IndexChange::Insert(location) => inserts.push((key, location)),
                IndexChange::None => {}
            }
            report.blocks.push(step.outcome);
        }

        report.stale = self.commit(&snapshot, &claimed, &renames, inserts);

        if report.blocks.is_empty() {
            tracing::info!(document = %document, marker = self.markers.tag(), "No snippets found");
        } else {
            tracing::info!(
                document = %document,
                blocks = report.blocks.len(),
                updated = report.updated(),
                created = report.created(),
                stale = report.stale.len(),
                "Processed document"
            );
        }

        Ok(report)
    }

    /// Apply one document's matches to the index and return its stale keys.
    fn commit(
        &mut self,
        snapshot: &[Record],
        claimed: &HashSet<IdentityKey>,
        renames: &[(IdentityKey, IdentityKey)],
        inserts: Vec<(IdentityKey, NormalizedPath)>,
    ) -> Vec<String> {
        let taken = |key: &IdentityKey| {
            renames.iter().any(|(_, new)| new == key) || inserts.iter().any(|(new, _)| new == key)
        };
        // Unmatched records whose key a block now occupies are replaced, not stale
        let stale = snapshot
            .iter()
            .filter(|r| !claimed.contains(&r.key) && !taken(&r.key))
            .map(|r| r.key.to_string())
            .collect();

        self.records.rename_keys(renames);
        for (key, location) in inserts {
            if let Some(previous) = self.records.upsert(&key, &location) {
                if previous != location {
                    tracing::warn!(key = %key, location = %previous, "Replaced record occupying the key");
                }
            }
        }

        stale
    }

    fn process_block(
        &mut self,
        source: &SourceConfig,
        document: &DocumentId,
        key: &IdentityKey,
        block: &Block,
        existing: &[Record],
        decider: &mut dyn Decider,
    ) -> BlockStep {
        let candidate = Candidate {
            document,
            key,
            block,
        };
        let resolution = self
            .resolver
            .resolve(&candidate, existing, &self.output, &self.metadata);
        tracing::debug!(key = %key, ?resolution, "Resolved block");

        match resolution {
            Resolution::Update {
                key: previous,
                location,
                tier,
            } => self.apply_update(key, previous, location, block, tier),
            Resolution::Ambiguous {
                key: previous,
                location,
                distance,
            } => {
                let question = AmbiguousMatch {
                    document,
                    candidate: key,
                    existing: &previous,
                    location: &location,
                    distance,
                    content: &block.content,
                };
                if decider.confirm_update(&question) {
                    self.apply_update(key, previous, location, block, MatchTier::Confirmed)
                } else {
                    tracing::info!(key = %key, existing = %previous, "Ambiguous match declined");
                    BlockStep::unrecorded(BlockOutcome {
                        key: key.to_string(),
                        location: None,
                        action: BlockAction::Abandoned {
                            existing_key: previous.to_string(),
                        },
                        write_error: None,
                    })
                }
            }
            Resolution::Create { defaults } => {
                self.create(source, document, key, block, defaults.as_ref(), decider)
            }
        }
    }

    fn apply_update(
        &mut self,
        key: &IdentityKey,
        previous: IdentityKey,
        location: NormalizedPath,
        block: &Block,
        tier: MatchTier,
    ) -> BlockStep {
        let write_error = self
            .output
            .write_snippet(&location, &block.content)
            .err()
            .map(|e| {
                tracing::warn!(location = %location, error = %e, "Failed to write snippet");
                e.to_string()
            });
        tracing::debug!(key = %key, previous = %previous, %tier, "Updated snippet");

        BlockStep {
            outcome: BlockOutcome {
                key: key.to_string(),
                location: Some(location.to_string()),
                action: BlockAction::Updated {
                    tier,
                    previous_key: previous.to_string(),
                },
                write_error,
            },
            change: IndexChange::Rename(previous),
        }
    }

    fn create(
        &mut self,
        source: &SourceConfig,
        document: &DocumentId,
        key: &IdentityKey,
        block: &Block,
        defaults: Option<&MetadataEntry>,
        decider: &mut dyn Decider,
    ) -> BlockStep {
        let outcome = |action, location: Option<&NormalizedPath>, write_error| BlockOutcome {
            key: key.to_string(),
            location: location.map(ToString::to_string),
            action,
            write_error,
        };

        let request = NewSnippet {
            document,
            key,
            declared_name: block.name.as_deref(),
            defaults,
            content: &block.content,
        };
        let Some(description) = decider.describe(&request) else {
            tracing::info!(key = %key, "Skipping snippet without a name");
            return BlockStep::unrecorded(outcome(BlockAction::Skipped, None, None));
        };
        let name = description.name.trim();
        if name.is_empty() {
            tracing::info!(key = %key, "Skipping snippet without a name");
            return BlockStep::unrecorded(outcome(BlockAction::Skipped, None, None));
        }

        let location = match snippet_location(
            &self.settings.output_dir(),
            &document.collection,
            &description.group,
            name,
        ) {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Rejected snippet name");
                return BlockStep::unrecorded(outcome(
                    BlockAction::Failed {
                        reason: e.to_string(),
                    },
                    None,
                    None,
                ));
            }
        };

        if self.records.location_in_use(&location, Some(key)) {
            tracing::warn!(location = %location, "Location already used by another record, overwriting");
        }
        self.metadata.set(
            &document.collection,
            block.name.as_deref().unwrap_or(name),
            MetadataEntry {
                group: description.group.trim().to_string(),
                description: description.description.clone(),
            },
        );

        let presentation = Presentation {
            name,
            description: &description.description,
            collection: &document.collection,
            author: &source.author,
            license: &source.license,
            repo_url: &source.repo_url,
        };
        let write_error = self
            .output
            .write_snippet(&location, &block.content)
            .and_then(|()| self.output.write_description(&location, &presentation))
            .err()
            .map(|e| {
                tracing::warn!(location = %location, error = %e, "Failed to write snippet");
                e.to_string()
            });
        tracing::info!(key = %key, location = %location, "Created snippet");

        BlockStep {
            outcome: outcome(BlockAction::Created, Some(&location), write_error),
            change: IndexChange::Insert(location),
        }
    }

    /// Drop the stale records listed in `report` from the index.
    ///
    /// Snippet files stay on disk.
    pub fn prune(&mut self, report: &mut DocumentReport) {
        for stale in &report.stale {
            let Some(key) = IdentityKey::parse(stale) else {
                continue;
            };
            if let Some(location) = self.records.remove(&key) {
                tracing::info!(key = %key, location = %location, "Pruned stale record");
                report.pruned.push(stale.clone());
            }
        }
    }

    /// Persist the index and metadata.
    ///
    /// Both files are attempted even if the first fails; in-memory state and
    /// already written snippets are left as they are.
    pub fn save(&self) -> Result<()> {
        let mut messages = Vec::new();

        let index_path = self.settings.index_path().resolve_against(&self.root);
        if let Err(e) = self.records.save(&index_path) {
            tracing::error!(path = %index_path, error = %e, "Failed to save index");
            messages.push(e.to_string());
        }

        let metadata_path = self.settings.metadata_path().resolve_against(&self.root);
        if let Err(e) = self.metadata.save(&metadata_path) {
            tracing::error!(path = %metadata_path, error = %e, "Failed to save metadata");
            messages.push(e.to_string());
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(Error::StateSave { messages })
        }
    }
}
