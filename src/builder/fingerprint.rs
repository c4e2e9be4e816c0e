//! Build fingerprinting for incremental builds.
//!
//! Fingerprints capture all inputs to a build step, allowing us to skip
//! rebuilding when nothing has changed. Flags are part of every
//! fingerprint, so switching between release and debug rebuilds.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::hash::{sha256_file, Fingerprint as HashFingerprint};

/// File name of the cache inside the build temp directory.
pub const FINGERPRINT_FILE: &str = "fingerprints.json";

fn flags_hash(flags: &[String]) -> String {
    let mut fp = HashFingerprint::new();
    fp.update_strs(flags.iter().map(String::as_str));
    fp.finish_short()
}

/// Fingerprint for a compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileFingerprint {
    /// Source file hash
    pub source_hash: String,

    /// Compiler identity
    pub compiler: String,

    /// Effective command line hash
    pub flags_hash: String,

    /// Header dependency hashes
    pub header_hashes: BTreeMap<PathBuf, String>,
}

impl CompileFingerprint {
    pub fn for_source(
        source: &Path,
        compiler: &str,
        flags: &[String],
        headers: &[PathBuf],
    ) -> Result<Self> {
        let mut header_hashes = BTreeMap::new();
        for header in headers {
            if header.exists() {
                header_hashes.insert(header.clone(), sha256_file(header)?);
            }
        }

        Ok(CompileFingerprint {
            source_hash: sha256_file(source)?,
            compiler: compiler.to_string(),
            flags_hash: flags_hash(flags),
            header_hashes,
        })
    }
}

/// Fingerprint for the link step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFingerprint {
    /// Object file hashes
    pub object_hashes: BTreeMap<PathBuf, String>,

    /// Linker command line hash
    pub flags_hash: String,
}

impl LinkFingerprint {
    pub fn for_link(objects: &[PathBuf], flags: &[String]) -> Result<Self> {
        let mut object_hashes = BTreeMap::new();
        for obj in objects {
            object_hashes.insert(obj.clone(), sha256_file(obj)?);
        }

        Ok(LinkFingerprint {
            object_hashes,
            flags_hash: flags_hash(flags),
        })
    }
}

/// Fingerprint cache for one build directory.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FingerprintCache {
    /// Compile fingerprints by source path
    pub compile: BTreeMap<PathBuf, CompileFingerprint>,

    /// Link fingerprints by module name
    pub link: BTreeMap<String, LinkFingerprint>,
}

impl FingerprintCache {
    /// Load the cache; a missing or unreadable file starts fresh.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return FingerprintCache::default();
        }

        std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|s| serde_json::from_str(&s).map_err(anyhow::Error::from))
            .unwrap_or_else(|e| {
                tracing::debug!("discarding fingerprint cache {}: {}", path.display(), e);
                FingerprintCache::default()
            })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Check if a source file needs recompilation.
    ///
    /// A missing object always needs compiling, whatever the cache says.
    pub fn needs_compile(&self, source: &Path, object: &Path, current: &CompileFingerprint) -> bool {
        !object.exists() || self.compile.get(source) != Some(current)
    }

    /// Check if a module needs relinking.
    pub fn needs_link(&self, module: &str, output: &Path, current: &LinkFingerprint) -> bool {
        !output.exists() || self.link.get(module) != Some(current)
    }

    pub fn update_compile(&mut self, source: PathBuf, fingerprint: CompileFingerprint) {
        self.compile.insert(source, fingerprint);
    }

    pub fn update_link(&mut self, module: String, fingerprint: LinkFingerprint) {
        self.link.insert(module, fingerprint);
    }
}
