//! [`TestProject`] builder for manifest scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary project directory.
///
/// # Example
///
/// ```rust,no_run
/// use kit_test_utils::project::TestProject;
///
/// let project = TestProject::with_manifest(r#"{ "name": "app" }"#);
/// project.assert_file_exists("package.json");
/// assert_eq!(project.manifest_json()["name"], "app");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// An empty directory without a manifest.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A directory whose `package.json` holds `manifest` verbatim.
    pub fn with_manifest(manifest: &str) -> Self {
        let project = Self::new();
        project.write_file("package.json", manifest);
        project
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("package.json")
    }

    /// Write `content` to `path` relative to the root, creating parents.
    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Raw bytes of `package.json`.
    pub fn manifest_bytes(&self) -> Vec<u8> {
        fs::read(self.manifest_path())
            .unwrap_or_else(|_| panic!("Could not read {}", self.manifest_path().display()))
    }

    /// `package.json` parsed as JSON.
    pub fn manifest_json(&self) -> Value {
        serde_json::from_slice(&self.manifest_bytes()).expect("package.json is not valid JSON")
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
