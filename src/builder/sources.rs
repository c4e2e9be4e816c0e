//! Native source discovery.

use std::path::Path;

use anyhow::Result;
use glob::glob;

use crate::core::errors::ExtensionError;
use crate::core::extension::SourceSet;
use crate::util::fs::normalize_path;

/// Pattern matched against files directly inside the source directory.
pub const SOURCE_PATTERN: &str = "*.cpp";

/// Collect the absolute paths of every `*.cpp` file directly in `dir`.
///
/// A missing directory or an empty match are both errors: an extension
/// without sources cannot be built.
pub fn discover_sources(dir: &Path) -> Result<SourceSet> {
    if !dir.is_dir() {
        return Err(ExtensionError::SourceDirMissing {
            dir: dir.to_path_buf(),
        }
        .into());
    }

    let dir = normalize_path(dir);
    let pattern = dir.join(SOURCE_PATTERN);
    let pattern = pattern.to_string_lossy();

    let entries = glob(&pattern).map_err(|e| ExtensionError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut sources = SourceSet::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => {
                sources.insert(normalize_path(&path));
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("glob error: {}", e),
        }
    }

    if sources.is_empty() {
        return Err(ExtensionError::NoSources {
            dir,
            pattern: SOURCE_PATTERN.to_string(),
        }
        .into());
    }

    tracing::debug!("found {} native source(s)", sources.len());
    Ok(sources)
}
