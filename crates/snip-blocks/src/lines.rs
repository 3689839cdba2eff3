//! Significant-line numbering.
//!
//! A line is *significant* when, after trimming, it is non-empty, is not a
//! single-line `/* ... */` comment and does not sit inside an open multi-line
//! comment. Identity keys are built from significant line numbers, so adding
//! blank lines or comment lines elsewhere in a style sheet does not move a
//! block.

const OPEN: &str = "/*";
const CLOSE: &str = "*/";

/// Precomputed line tables for one document scan.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset at which each raw line starts.
    line_starts: Vec<usize>,
    /// Significant-line count up to and including each raw line.
    significant: Vec<usize>,
}

impl LineMap {
    /// Build the tables in a single forward pass over `text`.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(idx, _)| idx + 1));

        let mut significant = Vec::with_capacity(line_starts.len());
        let mut counter = 0;
        let mut in_comment = false;
        for line in text.split('\n') {
            if is_significant(line, &mut in_comment) {
                counter += 1;
            }
            significant.push(counter);
        }

        Self {
            line_starts,
            significant,
        }
    }

    /// Number of raw lines in the document.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Map a raw 1-based line number to its significant-line number.
    ///
    /// Line `0` maps to `0`; lines past the end map to the final count.
    pub fn significant(&self, raw_line: usize) -> usize {
        if raw_line == 0 {
            return 0;
        }
        let idx = raw_line.min(self.significant.len()) - 1;
        self.significant[idx]
    }

    /// Raw 1-based line number containing byte `offset`.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }
}

fn is_significant(line: &str, in_comment: &mut bool) -> bool {
    let trimmed = line.trim();
    let opens = trimmed.contains(OPEN);
    let closes = trimmed.contains(CLOSE);

    if opens && !closes {
        let was_open = *in_comment;
        *in_comment = true;
        // Text ahead of the opener is still outside the comment.
        return !was_open && trimmed.find(OPEN).is_some_and(|idx| idx > 0);
    }

    if closes && !opens {
        let was_open = *in_comment;
        *in_comment = false;
        if !was_open {
            return true;
        }
        let rest = trimmed
            .find(CLOSE)
            .map(|idx| &trimmed[idx + CLOSE.len()..])
            .unwrap_or("");
        return !rest.trim().is_empty();
    }

    if *in_comment || trimmed.is_empty() {
        return false;
    }

    !(trimmed.starts_with(OPEN) && trimmed.ends_with(CLOSE))
}
