//! Error types for snip-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid block marker '{marker}': {reason}")]
    InvalidMarker { marker: String, reason: String },

    #[error("Failed to build block pattern: {0}")]
    Pattern(#[from] regex::Error),
}
