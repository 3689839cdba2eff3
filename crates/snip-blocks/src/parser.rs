//! Delimited block parsing.
//!
//! Parses snippet blocks in style sheets with the format:
//! ```text
//! /* obsi-snip-coll start [name] */
//! content here
//! /* obsi-snip-coll end */
//! ```
//!
//! Delimiters are matched case-insensitively and non-greedily: each start
//! pairs with the nearest following end. A start that meets another start (or
//! the end of the text) before any end is dangling and yields nothing.

use crate::error::{Error, Result};
use crate::lines::LineMap;
use regex::Regex;
use std::sync::LazyLock;

/// Marker tag used when none is configured.
pub const DEFAULT_MARKER: &str = "obsi-snip-coll";

static DEFAULT_MARKERS: LazyLock<Markers> =
    LazyLock::new(|| Markers::new(DEFAULT_MARKER).expect("Invalid default marker"));

/// A parsed block with its content and normalized position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Content between the delimiters, trimmed. Formatting is preserved.
    pub content: String,
    /// Name declared on the opening delimiter, if any.
    pub name: Option<String>,
    /// Significant-line number of the opening delimiter.
    pub start_line: usize,
    /// Significant-line number of the closing delimiter.
    pub end_line: usize,
    /// Raw 1-based line of the opening delimiter.
    pub raw_start_line: usize,
    /// Raw 1-based line of the closing delimiter.
    pub raw_end_line: usize,
}

impl Block {
    /// Length of the block in significant lines.
    pub fn span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }
}

/// Compiled opening and closing delimiter patterns for one marker tag.
#[derive(Debug, Clone)]
pub struct Markers {
    tag: String,
    open: Regex,
    close: Regex,
}

impl Markers {
    /// Compile the delimiter patterns for `tag`.
    ///
    /// # Errors
    /// Returns `Error::InvalidMarker` if the tag is empty or contains
    /// whitespace or comment markers.
    pub fn new(tag: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidMarker {
            marker: tag.to_string(),
            reason: reason.to_string(),
        };
        if tag.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if tag.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }
        if tag.contains("*/") || tag.contains("/*") {
            return Err(invalid("must not contain comment markers"));
        }

        let escaped = regex::escape(tag);
        let open = Regex::new(&format!(r"(?is)/\*\s*{escaped}\s+start\b(.*?)\*/"))?;
        let close = Regex::new(&format!(r"(?i)/\*\s*{escaped}\s+end\s*\*/"))?;

        Ok(Self {
            tag: tag.to_string(),
            open,
            close,
        })
    }

    /// The marker tag these patterns were built from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Lazily iterate over the blocks of `text`.
    pub fn blocks<'a>(&'a self, text: &'a str) -> Blocks<'a> {
        Blocks {
            text,
            markers: self,
            lines: LineMap::new(text),
            pos: 0,
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        DEFAULT_MARKERS.clone()
    }
}

/// Iterator over the blocks of one document, in document order.
#[derive(Debug)]
pub struct Blocks<'a> {
    text: &'a str,
    markers: &'a Markers,
    lines: LineMap,
    pos: usize,
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        loop {
            if self.pos >= self.text.len() {
                return None;
            }

            let open = self.markers.open.captures_at(self.text, self.pos)?;
            let open_match = open.get(0)?;
            let body_start = open_match.end();

            let Some(close) = self.markers.close.find_at(self.text, body_start) else {
                tracing::warn!(
                    line = self.lines.line_of_offset(open_match.start()),
                    "Start delimiter has no matching end, ignoring rest of document"
                );
                self.pos = self.text.len();
                return None;
            };

            if let Some(next_open) = self.markers.open.find_at(self.text, body_start) {
                if next_open.start() < close.start() {
                    tracing::warn!(
                        line = self.lines.line_of_offset(open_match.start()),
                        "Start delimiter is followed by another start, skipping"
                    );
                    self.pos = next_open.start();
                    continue;
                }
            }

            let name = open
                .get(1)
                .and_then(|m| m.as_str().split_whitespace().next())
                .map(str::to_string);
            let content = self.text[body_start..close.start()].trim().to_string();

            let raw_start_line = self.lines.line_of_offset(open_match.start());
            let raw_end_line = self.lines.line_of_offset(close.end());

            self.pos = close.end();

            return Some(Block {
                content,
                name,
                start_line: self.lines.significant(raw_start_line),
                end_line: self.lines.significant(raw_end_line),
                raw_start_line,
                raw_end_line,
            });
        }
    }
}

/// Parses all blocks from `text` using the default marker tag.
///
/// # Example
/// ```
/// use snip_blocks::parser::parse_blocks;
///
/// let css = "/* obsi-snip-coll start toggle */\n.toggle { color: red; }\n/* obsi-snip-coll end */";
///
/// let blocks: Vec<_> = parse_blocks(css).collect();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].name.as_deref(), Some("toggle"));
/// assert_eq!(blocks[0].content, ".toggle { color: red; }");
/// ```
pub fn parse_blocks(text: &str) -> Blocks<'_> {
    DEFAULT_MARKERS.blocks(text)
}
