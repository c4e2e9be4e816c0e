//! Implementation of `torchrl-build clean`.
//!
//! Cleaning is a composition: the caller's default cleanup runs first,
//! then compiled modules are swept from the package tree and the whole
//! build directory is dropped.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::layout::{native_module_extension, ProjectLayout};
use crate::util::fs::{
    find_entries_with_extension, remove_dir_all_best_effort, remove_dir_all_if_exists,
};

/// What a clean removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Compiled modules deleted from the package tree
    pub removed_artifacts: Vec<PathBuf>,

    /// Directories removed (default cleanup and build directory)
    pub removed_dirs: Vec<PathBuf>,
}

impl CleanReport {
    pub fn is_empty(&self) -> bool {
        self.removed_artifacts.is_empty() && self.removed_dirs.is_empty()
    }
}

/// Run `default_cleanup`, then remove compiled modules and `build/`.
///
/// Every entry named `*.<ext>` below the package directory is unlinked,
/// symlinks included. Errors from `default_cleanup` and from deleting a
/// single entry are returned, and `build/` is then left alone. Removing
/// `build/` itself is best-effort.
pub fn clean<F>(layout: &ProjectLayout, default_cleanup: F) -> Result<CleanReport>
where
    F: FnOnce() -> Result<Vec<PathBuf>>,
{
    let mut report = CleanReport {
        removed_dirs: default_cleanup()?,
        ..CleanReport::default()
    };

    let package_dir = layout.package_dir();
    for path in find_entries_with_extension(&package_dir, native_module_extension())? {
        println!("removing '{}'", path.display());
        fs::remove_file(&path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
        report.removed_artifacts.push(path);
    }

    let build_dir = layout.build_dir();
    if build_dir.exists() {
        println!("removing '{}' (and everything under it)", build_dir.display());
        remove_dir_all_best_effort(&build_dir);
        report.removed_dirs.push(build_dir);
    }

    Ok(report)
}

/// The default cleanup: temporary build output, plus everything under
/// `build/` for this platform when `all` is set.
pub fn standard_clean(layout: &ProjectLayout, all: bool) -> Result<Vec<PathBuf>> {
    let mut dirs = vec![layout.build_temp_dir()];
    if all {
        dirs.push(layout.build_lib_dir());
        dirs.push(layout.bdist_dir());
    }

    let mut removed = Vec::new();
    for dir in dirs {
        match remove_dir_all_if_exists(&dir) {
            Ok(true) => {
                println!("removing '{}' (and everything under it)", dir.display());
                removed.push(dir);
            }
            Ok(false) => {
                tracing::debug!("'{}' does not exist -- can't clean it", dir.display());
            }
            Err(e) => tracing::warn!("{:#}", e),
        }
    }
    Ok(removed)
}
