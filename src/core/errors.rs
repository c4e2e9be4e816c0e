//! Extension build error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error while assembling or building the native extension.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("native source directory does not exist: {}", dir.display())]
    SourceDirMissing { dir: PathBuf },

    #[error("no `{pattern}` sources found in {}", dir.display())]
    NoSources { dir: PathBuf, pattern: String },

    #[error("invalid source pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("no C++ compiler found (tried {})", tried.join(", "))]
    CompilerNotFound { tried: Vec<String> },

    #[error("`{command}` failed with exit code {code:?}\n{stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl ExtensionError {
    /// A hint that points the user towards a fix, if one is known.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ExtensionError::SourceDirMissing { .. } | ExtensionError::NoSources { .. } => {
                Some("help: run from the project root or pass `--root <dir>`")
            }
            ExtensionError::CompilerNotFound { .. } => {
                Some("help: set `CXX` or `toolchain.cxx` in .torchrl/build.toml")
            }
            ExtensionError::CommandFailed { .. } => {
                Some("help: run `torchrl-build build --verbose` for the full command lines")
            }
            ExtensionError::InvalidPattern { .. } => None,
        }
    }
}
