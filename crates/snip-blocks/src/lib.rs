//! Block extraction for Snippet Collector.
//!
//! Style sheets mark reusable snippets with comment delimiters:
//!
//! ```text
//! /* obsi-snip-coll start dark-toggle */
//! .toggle { color: var(--text-normal); }
//! /* obsi-snip-coll end */
//! ```
//!
//! Three pieces live here:
//!
//! - [`lines`]: maps raw line numbers to *significant* line numbers, skipping
//!   blank and comment-only lines so positions survive cosmetic edits.
//! - [`normalize`]: reduces CSS text to a canonical form for equality checks.
//! - [`parser`]: lazily yields delimited [`Block`]s with normalized positions.

pub mod error;
pub mod lines;
pub mod normalize;
pub mod parser;

pub use error::{Error, Result};
pub use lines::LineMap;
pub use normalize::{canonicalize, equivalent, fingerprint};
pub use parser::{Block, Blocks, DEFAULT_MARKER, Markers, parse_blocks};
