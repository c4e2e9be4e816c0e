//! Global context for torchrl-build operations.
//!
//! Resolves the project root and the configuration that applies to it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::layout::ProjectLayout;
use crate::util::config::{global_config_path, load_config, Config};

/// Global context containing the project layout and merged configuration.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    layout: ProjectLayout,
    config: Config,
    verbose: bool,
}

impl GlobalContext {
    /// Create a context for `root`, or the current directory when `None`.
    pub fn new(root: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir().context("failed to get current directory")?,
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("project root does not exist: {}", root.display()))?;

        let layout = ProjectLayout::new(root);
        let global = global_config_path();
        let config = load_config(global.as_deref(), &layout.config_path());

        Ok(GlobalContext {
            layout,
            config,
            verbose: false,
        })
    }

    /// Create a context with an explicit configuration.
    pub fn with_config(root: impl Into<PathBuf>, config: Config) -> Self {
        GlobalContext {
            layout: ProjectLayout::new(root),
            config,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_reads_project_config() {
        let tmp = TempDir::new().unwrap();
        let cfg_dir = tmp.path().join(".torchrl");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("build.toml"),
            "[build]\nextra_compile_args = [\"-Wextra\"]\n",
        )
        .unwrap();

        let ctx = GlobalContext::new(Some(tmp.path())).unwrap();
        assert_eq!(ctx.config().build.extra_compile_args, vec!["-Wextra"]);
        assert_eq!(ctx.root(), tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = GlobalContext::new(Some(&tmp.path().join("missing"))).unwrap_err();
        assert!(err.to_string().contains("project root does not exist"));
    }
}
