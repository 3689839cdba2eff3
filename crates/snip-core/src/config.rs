//! Run configuration: which style sheets to scan and where output goes.
//!
//! Loaded from `snippets.toml` (or a JSON/YAML file with the same shape):
//!
//! ```toml
//! [settings]
//! output_dir = "snippets"
//! marker = "obsi-snip-coll"
//! proximity = 30
//!
//! [[sources]]
//! path = "theme.css"
//! name = "my-theme"
//! author = "Jane Doe"
//! license = "MIT"
//! repo_url = "https://github.com/jane/my-theme"
//! ```

use crate::key::DocumentId;
use crate::resolver::DEFAULT_PROXIMITY;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use snip_blocks::DEFAULT_MARKER;
use snip_fs::{ConfigStore, NormalizedPath};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "snippets.toml";

/// File name of the record index inside the output directory.
pub const INDEX_FILE: &str = "index.json";

/// File name of the metadata store inside the output directory.
pub const METADATA_FILE: &str = "metadata.json";

fn default_output_dir() -> String {
    "snippets".to_string()
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_proximity() -> usize {
    DEFAULT_PROXIMITY
}

fn default_source_name() -> String {
    "my-theme".to_string()
}

fn default_author() -> String {
    "Unknown Author".to_string()
}

fn default_license() -> String {
    "MIT".to_string()
}

/// Run-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory receiving snippets, the index and metadata
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Tag used in `/* <marker> start */` delimiters
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Maximum start distance for automatic proximity matches
    #[serde(default = "default_proximity")]
    pub proximity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            marker: default_marker(),
            proximity: default_proximity(),
        }
    }
}

impl Settings {
    pub fn output_dir(&self) -> NormalizedPath {
        NormalizedPath::new(&self.output_dir)
    }

    /// Index location relative to the run root.
    pub fn index_path(&self) -> NormalizedPath {
        self.output_dir().join(INDEX_FILE)
    }

    /// Metadata location relative to the run root.
    pub fn metadata_path(&self) -> NormalizedPath {
        self.output_dir().join(METADATA_FILE)
    }
}

/// One style sheet to scan, with the authorship shown in descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the style sheet; relative paths resolve against the run root
    #[serde(default)]
    pub path: Option<String>,

    /// Collection name grouping this source's snippets
    #[serde(default = "default_source_name")]
    pub name: String,

    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_license")]
    pub license: String,

    #[serde(default)]
    pub repo_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            name: default_source_name(),
            author: default_author(),
            license: default_license(),
            repo_url: String::new(),
        }
    }
}

impl SourceConfig {
    /// Source with defaults for everything but the path.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Configured path as a normalized path.
    ///
    /// # Errors
    /// Returns `Error::SourcePathMissing` when no non-empty path is set.
    pub fn source_path(&self) -> Result<NormalizedPath> {
        self.path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(NormalizedPath::new)
            .ok_or_else(|| Error::SourcePathMissing {
                name: self.name.clone(),
            })
    }

    /// Identity of the scanned document: collection name plus file name.
    pub fn document_id(&self) -> Result<DocumentId> {
        let path = self.source_path()?;
        let file = path.file_name().unwrap_or(path.as_str()).to_string();
        Ok(DocumentId::new(self.name.clone(), file))
    }
}

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetConfig {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl SnippetConfig {
    /// Load a configuration file. Unlike the index, a broken configuration
    /// is an error: there is nothing sensible to run.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, sources = config.sources.len(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            snip_fs::Error::ConfigParse {
                path: CONFIG_FILE.into(),
                format: "TOML".into(),
                message: e.to_string(),
            }
            .into()
        })
    }
}
