//! Filesystem layer for Snippet Collector
//!
//! Provides normalized paths, atomic writes and format-agnostic loading of
//! structured documents (configuration, index and metadata files).

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::compute_content_checksum;
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_path_identifier};
