//! [`TestWorkspace`] builder for extraction scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary run root with helpers for writing sources and asserting on
/// the produced snippets.
///
/// # Example
///
/// ```rust,no_run
/// use snip_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write("theme.css", "/* obsi-snip-coll start a */\n.a{}\n/* obsi-snip-coll end */");
/// ws.write_config(&[("theme.css", "minimal")]);
/// ws.assert_file_exists("snippets.toml");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Write `snippets.toml` with one source per `(path, collection)` pair.
    pub fn write_config(&self, sources: &[(&str, &str)]) {
        let mut config = String::from("[settings]\noutput_dir = \"snippets\"\n");
        for (path, name) in sources {
            config.push_str(&format!(
                "\n[[sources]]\npath = \"{}\"\nname = \"{}\"\nauthor = \"Test Author\"\nlicense = \"MIT\"\nrepo_url = \"https://example.com/{}\"\n",
                path, name, name
            ));
        }
        self.write("snippets.toml", &config);
    }

    /// Parsed `snippets/index.json`, empty when the index was never written.
    pub fn index(&self) -> BTreeMap<String, String> {
        let path = self.path("snippets/index.json");
        if !path.exists() {
            return BTreeMap::new();
        }
        serde_json::from_str(&self.read("snippets/index.json")).unwrap()
    }

    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    pub fn assert_file_not_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }

    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "Expected {} to contain {:?}, got:\n{}",
            relative,
            content,
            file_content
        );
    }
}
