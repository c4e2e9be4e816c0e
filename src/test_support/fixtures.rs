//! Test fixtures for common test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::layout::{native_module_extension, ProjectLayout};

/// A temporary project with a `torchrl/` package and optional sources.
///
/// The directory is removed when the fixture is dropped.
pub struct ExtensionProject {
    dir: TempDir,
}

impl ExtensionProject {
    /// Create a project with an empty `torchrl/__init__.py`.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let project = ExtensionProject { dir };
        project.write("torchrl/__init__.py", "");
        project
    }

    /// Add `torchrl/csrc/<name>` for each name.
    pub fn with_sources(self, names: &[&str]) -> Self {
        for name in names {
            self.write(&format!("torchrl/csrc/{}", name), "int f() { return 0; }\n");
        }
        self
    }

    /// Add a compiled module at `rel`, using the platform's extension.
    pub fn with_artifact(self, rel: &str) -> Self {
        self.write(&format!("{}.{}", rel, native_module_extension()), "\x7fELF");
        self
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        fs::write(path, contents).expect("failed to write fixture file");
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.dir.path())
    }
}

impl Default for ExtensionProject {
    fn default() -> Self {
        Self::new()
    }
}
