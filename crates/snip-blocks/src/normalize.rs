//! Canonical form of CSS text for equality checks.
//!
//! The canonical form drops every `/* ... */` comment and every whitespace
//! character. It is only ever compared, never written out.

use regex::Regex;
use snip_fs::compute_content_checksum;
use std::sync::LazyLock;

static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("Invalid comment regex"));

/// Strip comments and all whitespace.
pub fn canonicalize(text: &str) -> String {
    COMMENT_REGEX
        .replace_all(text, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Checksum of the canonical form, in the `sha256:<hex>` format.
pub fn fingerprint(text: &str) -> String {
    compute_content_checksum(&canonicalize(text))
}

/// Whether two texts differ only in comments and whitespace.
pub fn equivalent(a: &str, b: &str) -> bool {
    canonicalize(a) == canonicalize(b)
}
