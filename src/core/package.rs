//! Installable package description.
//!
//! Everything here is declarative apart from package discovery, which
//! scans the project tree for directories holding `__init__.py`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use glob::Pattern;
use serde::Serialize;
use walkdir::WalkDir;

use crate::core::errors::ExtensionError;

/// The ML framework the package is built against.
pub const FRAMEWORK: &str = "torch";

/// Environment variable pinning the framework version.
pub const FRAMEWORK_VERSION_ENV: &str = "PYTORCH_VERSION";

/// Package discovery denylist (matched against dotted package names).
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "build*",
    "test*",
    "torchrl.csrc*",
    "third_party*",
    "tools*",
];

const PACKAGE_MARKER: &str = "__init__.py";

/// Metadata consumed by the packaging tool at install/build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub author: String,
    pub author_email: String,
    pub packages: Vec<String>,
    pub install_requires: Vec<String>,
    pub extras_require: BTreeMap<String, Vec<String>>,
}

impl PackageMetadata {
    /// Describe the package rooted at `root`.
    ///
    /// `framework_pin` is the value of [`FRAMEWORK_VERSION_ENV`], if set.
    pub fn describe(root: &Path, framework_pin: Option<&str>) -> Result<Self> {
        let packages = find_packages(root, DEFAULT_EXCLUDES)?;

        let mut install_requires = vec![core_dependency(framework_pin)];
        install_requires.extend(["numpy", "tensorboard", "packaging"].map(String::from));

        Ok(PackageMetadata {
            name: "torchrl".to_string(),
            version: "0.1".to_string(),
            author: "torchrl contributors".to_string(),
            author_email: "vmoens@fb.com".to_string(),
            packages,
            install_requires,
            extras_require: default_extras(),
        })
    }
}

/// Dependency specifier for the framework, pinned when a version is given.
pub fn core_dependency(pin: Option<&str>) -> String {
    match pin {
        Some(version) => format!("{}=={}", FRAMEWORK, version),
        None => FRAMEWORK.to_string(),
    }
}

/// Optional dependency groups, keyed by feature name.
pub fn default_extras() -> BTreeMap<String, Vec<String>> {
    let groups: &[(&str, &[&str])] = &[
        (
            "atari",
            &["gym", "atari-py", "ale-py", "gym[accept-rom-license]", "pygame"],
        ),
        ("dm_control", &["dm_control"]),
        ("gym_continuous", &["mujoco-py", "mujoco"]),
        ("rendering", &["moviepy"]),
        ("tests", &["pytest", "pyyaml"]),
        (
            "utils",
            &[
                "tqdm",
                "configargparse",
                "hydra-core>=1.1",
                "hydra-submitit-launcher",
            ],
        ),
    ];

    groups
        .iter()
        .map(|(name, deps)| {
            (
                name.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            )
        })
        .collect()
}

/// Find importable packages below `root`, as sorted dotted names.
///
/// A directory is a package when it contains `__init__.py` and its name
/// has no `.` in it. Only package directories are descended into. A
/// package whose dotted name matches one of `exclude` is left out, but
/// its sub-packages are still considered on their own.
pub fn find_packages(root: &Path, exclude: &[&str]) -> Result<Vec<String>> {
    let patterns = exclude
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| ExtensionError::InvalidPattern {
                pattern: p.to_string(),
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_type().is_dir() && looks_like_package(e.path()));

    let mut packages = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
        let rel = pathdiff::diff_paths(entry.path(), root)
            .unwrap_or_else(|| entry.path().to_path_buf());
        let dotted = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join(".");

        if patterns.iter().any(|p| p.matches(&dotted)) {
            tracing::debug!("excluding package `{}`", dotted);
            continue;
        }
        packages.push(dotted);
    }

    packages.sort();
    Ok(packages)
}

fn looks_like_package(dir: &Path) -> bool {
    let plain_name = dir
        .file_name()
        .map(|n| !n.to_string_lossy().contains('.'))
        .unwrap_or(false);
    plain_name && dir.join(PACKAGE_MARKER).is_file()
}
