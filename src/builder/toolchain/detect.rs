//! Toolchain detection functions.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::errors::ExtensionError;
use crate::util::config::ToolchainSettings;
use crate::util::process::{find_executable, ProcessBuilder};

use super::{GccToolchain, Toolchain, ToolchainFamily};

/// Compilers searched on PATH, in order.
pub const CXX_CANDIDATES: &[&str] = &["c++", "g++", "clang++"];

/// Detect the C++ toolchain.
///
/// Priority: configured `toolchain.cxx`, then `CXX`, then PATH search.
pub fn detect_toolchain(settings: &ToolchainSettings) -> Result<Box<dyn Toolchain>> {
    let env_cxx = std::env::var("CXX").ok();
    let cxx = resolve_cxx(settings.cxx.as_deref(), env_cxx.as_deref())?;
    let family = detect_compiler_family(&cxx);

    tracing::debug!("using {} toolchain: {}", family.as_str(), cxx.display());

    Ok(Box::new(GccToolchain::new(cxx, family)))
}

fn resolve_cxx(configured: Option<&Path>, env_cxx: Option<&str>) -> Result<PathBuf> {
    if let Some(cxx) = configured {
        if let Some(path) = find_program(cxx) {
            return Ok(path);
        }
        tracing::warn!("Configured C++ compiler not found: {}", cxx.display());
    }

    if let Some(cxx) = env_cxx.filter(|s| !s.is_empty()) {
        if let Some(path) = find_program(Path::new(cxx)) {
            return Ok(path);
        }
        tracing::warn!("CXX={} not found, searching PATH", cxx);
    }

    for candidate in CXX_CANDIDATES {
        if let Some(path) = find_executable(candidate) {
            return Ok(path);
        }
    }

    let mut tried: Vec<String> = configured
        .map(|p| p.display().to_string())
        .into_iter()
        .chain(env_cxx.map(str::to_string))
        .collect();
    tried.extend(CXX_CANDIDATES.iter().map(|s| s.to_string()));

    Err(ExtensionError::CompilerNotFound { tried }.into())
}

/// An existing path is taken as-is; a bare name is looked up on PATH.
fn find_program(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 || program.is_absolute() {
        return program.exists().then(|| program.to_path_buf());
    }
    find_executable(&program.to_string_lossy())
}

/// Guess the compiler family from its name, then from `--version`.
fn detect_compiler_family(cxx: &Path) -> ToolchainFamily {
    let name = cxx
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    if name.contains("g++") {
        return ToolchainFamily::Gcc;
    }

    let version = ProcessBuilder::new(cxx)
        .arg("--version")
        .exec()
        .map(|o| String::from_utf8_lossy(&o.stdout).to_lowercase())
        .unwrap_or_default();

    family_from_version(&name, &version)
}

fn family_from_version(name: &str, version: &str) -> ToolchainFamily {
    if version.contains("apple") && version.contains("clang") {
        ToolchainFamily::AppleClang
    } else if version.contains("clang") || name.contains("clang") {
        ToolchainFamily::Clang
    } else {
        ToolchainFamily::Gcc
    }
}
