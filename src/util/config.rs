//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.torchrl/build.toml` - User-wide defaults
//! - Project: `.torchrl/build.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Build harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extension build settings
    pub build: BuildSettings,

    /// Compiler selection
    pub toolchain: ToolchainSettings,

    /// Framework discovery
    pub torch: TorchSettings,
}

/// Extra inputs appended to the extension descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Additional include directories
    pub include_dirs: Vec<PathBuf>,

    /// Additional library search paths
    pub library_dirs: Vec<PathBuf>,

    /// Additional libraries to link (without -l prefix)
    pub libraries: Vec<String>,

    /// Compiler flags appended after the profile's flags
    pub extra_compile_args: Vec<String>,

    /// Linker flags appended after the profile's flags
    pub extra_link_args: Vec<String>,

    /// Copy the built module into the package directory
    pub inplace: Option<bool>,
}

impl BuildSettings {
    pub fn is_inplace(&self) -> bool {
        self.inplace.unwrap_or(false)
    }
}

/// Toolchain settings for C++ compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the C++ compiler (e.g., /usr/bin/clang++)
    pub cxx: Option<PathBuf>,
}

/// Interpreter used for the framework probe when none is configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// Settings for asking the framework where its headers and libraries are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorchSettings {
    /// Run the probe at all (default: false)
    pub probe: Option<bool>,

    /// Interpreter used for the probe
    pub python: Option<PathBuf>,
}

impl TorchSettings {
    pub fn probe_enabled(&self) -> bool {
        self.probe.unwrap_or(false)
    }

    pub fn python(&self) -> &Path {
        self.python
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_PYTHON))
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.build.include_dirs.is_empty() {
            self.build.include_dirs = other.build.include_dirs;
        }
        if !other.build.library_dirs.is_empty() {
            self.build.library_dirs = other.build.library_dirs;
        }
        if !other.build.libraries.is_empty() {
            self.build.libraries = other.build.libraries;
        }
        if !other.build.extra_compile_args.is_empty() {
            self.build.extra_compile_args = other.build.extra_compile_args;
        }
        if !other.build.extra_link_args.is_empty() {
            self.build.extra_link_args = other.build.extra_link_args;
        }
        if other.build.inplace.is_some() {
            self.build.inplace = other.build.inplace;
        }

        if other.toolchain.cxx.is_some() {
            self.toolchain.cxx = other.toolchain.cxx;
        }

        if other.torch.probe.is_some() {
            self.torch.probe = other.torch.probe;
        }
        if other.torch.python.is_some() {
            self.torch.python = other.torch.python;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.torchrl/build.toml)
/// 2. Global config (~/.torchrl/build.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.torchrl).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".torchrl"))
}

/// Get the global config path (~/.torchrl/build.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("build.toml"))
}
