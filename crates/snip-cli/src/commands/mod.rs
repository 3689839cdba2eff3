//! Command implementations for snip-cli

pub mod extract;
pub mod status;

pub use extract::{ExtractArgs, run_extract};
pub use status::run_status;

use std::path::Path;

use snip_core::SnippetConfig;
use snip_fs::NormalizedPath;

use crate::error::Result;

/// A configuration file together with the root its paths resolve against.
#[derive(Debug)]
pub(crate) struct LoadedConfig {
    /// Directory holding the configuration file.
    pub root: NormalizedPath,
    pub path: NormalizedPath,
    /// `None` when the file does not exist.
    pub config: Option<SnippetConfig>,
}

/// Locate and parse the configuration file.
///
/// A missing file is not an error here; callers decide whether they can
/// run without one. A file that exists but does not parse is.
pub(crate) fn load_config(cwd: &Path, config: &Path) -> Result<LoadedConfig> {
    let path = if config.is_absolute() {
        NormalizedPath::new(config)
    } else {
        NormalizedPath::new(cwd.join(config))
    };
    let root = path.parent().unwrap_or_else(|| NormalizedPath::new(cwd));

    let config = if path.is_file() {
        Some(SnippetConfig::load(&path)?)
    } else {
        tracing::debug!(path = %path, "No configuration file");
        None
    };

    Ok(LoadedConfig { root, path, config })
}
