//! Snippet output: where extracted CSS and its description document go.
//!
//! The engine only deals in locations (normalized path strings as stored in
//! the index). Implementations decide what a location means: [`FsOutput`]
//! resolves it against a root directory, [`MemoryOutput`] keeps everything in
//! memory (optionally reading through to disk for dry runs).

use crate::{Error, Result};
use snip_fs::{NormalizedPath, io, validate_path_identifier};
use std::collections::BTreeMap;

/// Read access to previously written snippets.
pub trait SnippetReader {
    fn read_snippet(&self, location: &NormalizedPath) -> Result<String>;
}

/// Sink for snippet content and presentation documents.
pub trait SnippetOutput: SnippetReader {
    fn write_snippet(&mut self, location: &NormalizedPath, content: &str) -> Result<()>;

    /// Write the description document that accompanies a snippet.
    fn write_description(&mut self, location: &NormalizedPath, presentation: &Presentation<'_>) -> Result<()>;
}

/// Fields rendered into a snippet's description document.
#[derive(Debug, Clone)]
pub struct Presentation<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub collection: &'a str,
    pub author: &'a str,
    pub license: &'a str,
    pub repo_url: &'a str,
}

impl Presentation<'_> {
    /// Render the markdown document for the snippet stored at `location`.
    pub fn render(&self, location: &NormalizedPath) -> String {
        let file_name = location.file_name().unwrap_or(self.name);
        format!(
            "---\n\
             author: {author}\n\
             source: {source}\n\
             license: {license}\n\
             ---\n\
             \n\
             # {title}\n\
             \n\
             {description}\n\
             \n\
             This snippet was automatically extracted from the `{collection}` theme.\n\
             \n\
             [View this file](./{file_name})\n",
            author = self.author,
            source = self.repo_url,
            license = self.license,
            title = title_case(self.name),
            description = self.description,
            collection = self.collection,
        )
    }
}

/// `dark-mode-toggle` -> `Dark Mode Toggle`.
pub fn title_case(name: &str) -> String {
    name.split(['-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Location of a new snippet: `<output_dir>/<collection>/<group>/<name>.css`.
///
/// An empty group places the snippet directly under the collection.
///
/// # Errors
/// Returns `Error::InvalidName` if the name or group is not a safe single
/// path component.
pub fn snippet_location(
    output_dir: &NormalizedPath,
    collection: &str,
    group: &str,
    name: &str,
) -> Result<NormalizedPath> {
    validate_path_identifier(name).map_err(|e| Error::InvalidName(e.to_string()))?;
    validate_path_identifier(collection).map_err(|e| Error::InvalidName(e.to_string()))?;
    if !group.trim().is_empty() {
        validate_path_identifier(group).map_err(|e| Error::InvalidName(e.to_string()))?;
    }
    Ok(output_dir
        .join(collection)
        .join(group.trim())
        .join(&format!("{}.css", name)))
}

/// Filesystem output rooted at a working directory.
///
/// Relative locations are resolved against the root; absolute ones are used
/// as-is.
#[derive(Debug, Clone)]
pub struct FsOutput {
    root: NormalizedPath,
}

impl FsOutput {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, location: &NormalizedPath) -> NormalizedPath {
        location.resolve_against(&self.root)
    }
}

impl SnippetReader for FsOutput {
    fn read_snippet(&self, location: &NormalizedPath) -> Result<String> {
        Ok(io::read_text(&self.resolve(location))?)
    }
}

impl SnippetOutput for FsOutput {
    fn write_snippet(&mut self, location: &NormalizedPath, content: &str) -> Result<()> {
        let path = self.resolve(location);
        io::write_text(&path, content)?;
        tracing::debug!(path = %path, "Wrote snippet");
        Ok(())
    }

    fn write_description(&mut self, location: &NormalizedPath, presentation: &Presentation<'_>) -> Result<()> {
        let path = self.resolve(&location.with_extension("md"));
        io::write_text(&path, &presentation.render(location))?;
        tracing::debug!(path = %path, "Wrote description");
        Ok(())
    }
}

/// In-memory output.
///
/// With [`MemoryOutput::over`] reads fall through to another reader for
/// locations not written in this session, which is what a dry run needs:
/// prior snippets are visible but nothing touches the disk.
#[derive(Debug)]
pub struct MemoryOutput<R = FsOutput> {
    files: BTreeMap<NormalizedPath, String>,
    fallback: Option<R>,
}

impl MemoryOutput<FsOutput> {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            fallback: None,
        }
    }
}

impl Default for MemoryOutput<FsOutput> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SnippetReader> MemoryOutput<R> {
    pub fn over(fallback: R) -> Self {
        Self {
            files: BTreeMap::new(),
            fallback: Some(fallback),
        }
    }

    /// Content written to `location` in this session.
    pub fn get(&self, location: &str) -> Option<&str> {
        self.files.get(&NormalizedPath::new(location)).map(String::as_str)
    }

    /// Every location written in this session, in order.
    pub fn locations(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.files.keys()
    }
}

impl<R: SnippetReader> SnippetReader for MemoryOutput<R> {
    fn read_snippet(&self, location: &NormalizedPath) -> Result<String> {
        if let Some(content) = self.files.get(location) {
            return Ok(content.clone());
        }
        match &self.fallback {
            Some(reader) => reader.read_snippet(location),
            None => Err(snip_fs::Error::io(
                location.to_native(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "not written in this session"),
            )
            .into()),
        }
    }
}

impl<R: SnippetReader> SnippetOutput for MemoryOutput<R> {
    fn write_snippet(&mut self, location: &NormalizedPath, content: &str) -> Result<()> {
        self.files.insert(location.clone(), content.to_string());
        Ok(())
    }

    fn write_description(&mut self, location: &NormalizedPath, presentation: &Presentation<'_>) -> Result<()> {
        self.files
            .insert(location.with_extension("md"), presentation.render(location));
        Ok(())
    }
}
