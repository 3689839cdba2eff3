//! Error types for snip-core

/// Result type for snip-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in snip-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Identity key string does not follow `{collection}_{file}_{start}_{end}`
    #[error("Invalid identity key: {key}")]
    InvalidKey { key: String },

    /// A configured source has no usable path
    #[error("Source '{name}' has no path configured")]
    SourcePathMissing { name: String },

    /// Snippet name or group rejected before anything is written
    #[error("Invalid snippet name: {0}")]
    InvalidName(String),

    /// One or both state files could not be persisted
    #[error("Failed to save state: {}", messages.join("; "))]
    StateSave { messages: Vec<String> },

    /// Filesystem error from snip-fs
    #[error(transparent)]
    Fs(#[from] snip_fs::Error),

    /// Block parsing error from snip-blocks
    #[error(transparent)]
    Blocks(#[from] snip_blocks::Error),
}
