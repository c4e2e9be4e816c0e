//! Project layout: where sources live and where artifacts go.

use std::path::{Path, PathBuf};

/// Name of the Python package directory.
pub const PACKAGE_DIR: &str = "torchrl";

/// Native sources, relative to the project root.
pub const CSRC_DIR: &str = "torchrl/csrc";

/// Top-level build output directory.
pub const BUILD_DIR: &str = "build";

/// Fixed paths of a torchrl checkout, anchored at its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The Python package directory (`torchrl/`).
    pub fn package_dir(&self) -> PathBuf {
        self.root.join(PACKAGE_DIR)
    }

    /// The native source directory (`torchrl/csrc/`).
    pub fn csrc_dir(&self) -> PathBuf {
        self.root.join(CSRC_DIR)
    }

    /// The top-level build directory (`build/`).
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    /// Object files and fingerprints (`build/temp.<platform>/`).
    pub fn build_temp_dir(&self) -> PathBuf {
        self.build_dir().join(format!("temp.{}", platform_tag()))
    }

    /// Linked modules (`build/lib.<platform>/`).
    pub fn build_lib_dir(&self) -> PathBuf {
        self.build_dir().join(format!("lib.{}", platform_tag()))
    }

    /// Binary distribution staging (`build/bdist.<platform>/`).
    pub fn bdist_dir(&self) -> PathBuf {
        self.build_dir().join(format!("bdist.{}", platform_tag()))
    }

    /// Project config file (`.torchrl/build.toml`).
    pub fn config_path(&self) -> PathBuf {
        self.root.join(".torchrl").join("build.toml")
    }
}

/// `<os>-<arch>`, used to keep per-platform build directories apart.
pub fn platform_tag() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// File extension of a loadable native module on this platform.
pub fn native_module_extension() -> &'static str {
    if cfg!(windows) {
        "pyd"
    } else {
        "so"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = ProjectLayout::new("/work/rl");
        assert_eq!(layout.package_dir(), PathBuf::from("/work/rl/torchrl"));
        assert_eq!(layout.csrc_dir(), PathBuf::from("/work/rl/torchrl/csrc"));
        assert_eq!(layout.build_dir(), PathBuf::from("/work/rl/build"));
        assert!(layout.build_temp_dir().starts_with("/work/rl/build"));
        assert!(layout
            .build_lib_dir()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("lib."));
    }

    #[test]
    fn test_platform_tag() {
        let tag = platform_tag();
        assert!(tag.contains(std::env::consts::OS));
        assert!(tag.contains(std::env::consts::ARCH));
    }
}
