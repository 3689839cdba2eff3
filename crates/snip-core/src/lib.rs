//! Snippet reconciliation engine for Snippet Collector
//!
//! Turns delimited blocks found by `snip-blocks` into snippet files and keeps
//! them in step with their source across runs:
//!
//! - **Identity keys** ([`key`]): `{collection}_{file}_{start}_{end}` built
//!   from significant-line positions
//! - **Record index** ([`index`]): persisted key -> snippet location mapping
//! - **Metadata** ([`metadata`]): group/description defaults per declared name
//! - **Identity resolver** ([`resolver`]): tiered matching of new blocks
//!   against existing records
//! - **Extractor** ([`engine`]): per-run orchestration with explicit state
//!
//! # Architecture
//!
//! ```text
//!            snip-cli
//!               |
//!           snip-core
//!            /     |
//!   snip-blocks    |
//!            \     |
//!            snip-fs
//! ```
//!
//! # Example
//!
//! ```
//! use snip_core::{AutoDecider, Extractor, MemoryOutput, MetadataStore, RecordStore, Settings, SourceConfig};
//!
//! let css = "/* obsi-snip-coll start toggle */\n.toggle { color: red; }\n/* obsi-snip-coll end */\n";
//! let mut extractor = Extractor::new(
//!     ".",
//!     Settings::default(),
//!     RecordStore::new(),
//!     MetadataStore::new(),
//!     MemoryOutput::new(),
//! )
//! .unwrap();
//!
//! let source = SourceConfig::with_path("theme.css");
//! let report = extractor
//!     .process_document(&source, css, &mut AutoDecider::new())
//!     .unwrap();
//! assert_eq!(report.created(), 1);
//! assert_eq!(extractor.records().len(), 1);
//! ```

pub mod config;
pub mod decider;
pub mod engine;
pub mod error;
pub mod index;
pub mod key;
pub mod metadata;
pub mod output;
pub mod resolver;
pub mod status;

pub use config::{CONFIG_FILE, Settings, SnippetConfig, SourceConfig};
pub use decider::{AmbiguousMatch, AutoDecider, Decider, NewSnippet, SnippetDescription};
pub use engine::{
    BlockAction, BlockOutcome, DocumentReport, Extractor, RunOptions, RunReport, SourceFailure,
};
pub use error::{Error, Result};
pub use index::{Record, RecordStore};
pub use key::{DocumentId, IdentityKey};
pub use metadata::{MetadataEntry, MetadataStore};
pub use output::{FsOutput, MemoryOutput, Presentation, SnippetOutput, SnippetReader};
pub use resolver::{Candidate, DEFAULT_PROXIMITY, IdentityResolver, MatchTier, Resolution};
pub use status::{RecordStatus, record_status};
