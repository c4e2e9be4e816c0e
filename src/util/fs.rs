//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
        return Ok(true);
    }
    Ok(false)
}

/// Remove as much of a directory tree as possible, ignoring errors.
///
/// Returns whether the directory existed beforehand.
pub fn remove_dir_all_best_effort(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    if let Err(e) = fs::remove_dir_all(path) {
        tracing::debug!("ignoring error removing {}: {}", path.display(), e);
    }
    true
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Copy a file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Find every file below `dir` whose extension is `ext`, recursively.
///
/// Symlinks count as files and are not followed. A missing `dir` yields
/// no files.
pub fn find_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to scan {}", dir.display()))?;
        let file_type = entry.file_type();
        if (file_type.is_file() || file_type.is_symlink())
            && entry.path().extension().is_some_and(|e| e == ext)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Find every entry below `dir` whose name has extension `ext`, whatever
/// its type. Directories are included and still descended.
pub fn find_entries_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to scan {}", dir.display()))?;
        if entry.path().extension().is_some_and(|e| e == ext) {
            entries.push(entry.into_path());
        }
    }
    Ok(entries)
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_files_with_extension() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("top.so"), "").unwrap();
        fs::write(nested.join("deep.so"), "").unwrap();
        fs::write(nested.join("deep.so.txt"), "").unwrap();
        fs::write(nested.join("module.py"), "").unwrap();

        let files = find_files_with_extension(tmp.path(), "so").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "so"));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_files_includes_symlinks() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("real.bin");
        fs::write(&target, "").unwrap();
        std::os::unix::fs::symlink(&target, tmp.path().join("link.so")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling.so"))
            .unwrap();

        let files = find_files_with_extension(tmp.path(), "so").unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("dangling.so"), tmp.path().join("link.so")]
        );
    }

    #[test]
    fn test_find_files_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let files = find_files_with_extension(&tmp.path().join("nope"), "so").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_entries_includes_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("odd.so")).unwrap();
        fs::write(tmp.path().join("odd.so/inner.so"), "").unwrap();
        fs::write(tmp.path().join("plain.so"), "").unwrap();

        let entries = find_entries_with_extension(tmp.path(), "so").unwrap();
        assert_eq!(
            entries,
            vec![
                tmp.path().join("odd.so"),
                tmp.path().join("odd.so/inner.so"),
                tmp.path().join("plain.so"),
            ]
        );
    }

    #[test]
    fn test_remove_dir_all_best_effort() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("build/lib");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("x.o"), "").unwrap();

        assert!(remove_dir_all_best_effort(&tmp.path().join("build")));
        assert!(!tmp.path().join("build").exists());
        assert!(!remove_dir_all_best_effort(&tmp.path().join("build")));
    }

    #[test]
    fn test_copy_file_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("m.so");
        fs::write(&src, "bin").unwrap();
        let dst = tmp.path().join("out/torchrl/m.so");

        copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst).unwrap(), "bin");
    }
}
