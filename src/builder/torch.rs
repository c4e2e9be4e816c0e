//! Framework header and library discovery.
//!
//! Asks the framework's own extension helper, through the configured
//! interpreter, where its headers and libraries live. A failed probe only
//! costs those paths; the build goes on with what the config provides.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::util::config::TorchSettings;
use crate::util::process::ProcessBuilder;

/// Libraries every framework extension links against.
pub const TORCH_LIBRARIES: &[&str] = &["c10", "torch", "torch_cpu", "torch_python"];

const PROBE_SCRIPT: &str = r#"
import json, sysconfig
from torch.utils import cpp_extension
print(json.dumps({
    "include_dirs": cpp_extension.include_paths() + [sysconfig.get_paths()["include"]],
    "library_dirs": cpp_extension.library_paths(),
}))
"#;

/// Paths reported by the framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TorchPaths {
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub libraries: Vec<String>,
}

impl TorchPaths {
    /// Run the probe when enabled. Errors are logged and yield `None`.
    pub fn probe(settings: &TorchSettings) -> Option<TorchPaths> {
        if !settings.probe_enabled() {
            return None;
        }

        match Self::run_probe(settings) {
            Ok(paths) => {
                tracing::debug!(
                    "framework probe: {} include dir(s), {} library dir(s)",
                    paths.include_dirs.len(),
                    paths.library_dirs.len()
                );
                Some(paths)
            }
            Err(e) => {
                tracing::warn!("framework probe failed, continuing without it: {:#}", e);
                None
            }
        }
    }

    fn run_probe(settings: &TorchSettings) -> Result<TorchPaths> {
        let output = ProcessBuilder::new(settings.python())
            .args(["-c", PROBE_SCRIPT])
            .exec_and_check()?;
        Self::parse(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse the probe's JSON line and add the standard libraries.
    pub fn parse(stdout: &str) -> Result<TorchPaths> {
        let line = stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .context("framework probe printed nothing")?;
        let mut paths: TorchPaths =
            serde_json::from_str(line).context("framework probe printed invalid JSON")?;
        paths
            .libraries
            .extend(TORCH_LIBRARIES.iter().map(|s| s.to_string()));
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_output() {
        let stdout = "warning: something\n{\"include_dirs\": [\"/t/include\"], \"library_dirs\": [\"/t/lib\"]}\n";
        let paths = TorchPaths::parse(stdout).unwrap();
        assert_eq!(paths.include_dirs, vec![PathBuf::from("/t/include")]);
        assert_eq!(paths.library_dirs, vec![PathBuf::from("/t/lib")]);
        assert_eq!(paths.libraries, vec!["c10", "torch", "torch_cpu", "torch_python"]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TorchPaths::parse("").is_err());
        assert!(TorchPaths::parse("ModuleNotFoundError: torch").is_err());
    }

    #[test]
    fn test_disabled_probe_does_nothing() {
        let settings = TorchSettings::default();
        assert_eq!(TorchPaths::probe(&settings), None);
    }

    #[test]
    fn test_failed_probe_is_soft() {
        let settings = TorchSettings {
            probe: Some(true),
            python: Some(PathBuf::from("/nonexistent/python-for-probe")),
        };
        assert_eq!(TorchPaths::probe(&settings), None);
    }
}
