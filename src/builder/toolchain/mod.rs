//! Toolchain abstraction for the C++ compiler driver.
//!
//! This module turns compile and link inputs into concrete command lines.
//!
//! Toolchain detection priority:
//! 1. `toolchain.cxx` in `.torchrl/build.toml` or `~/.torchrl/build.toml`
//! 2. The `CXX` environment variable
//! 3. Auto-detection (searching PATH for common compilers)

use std::path::{Path, PathBuf};

use crate::util::process::ProcessBuilder;

mod detect;
mod gcc;

pub use detect::{detect_toolchain, CXX_CANDIDATES};
pub use gcc::GccToolchain;

/// A command to execute, with program and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Turn this spec into a runnable process.
    pub fn to_process(&self) -> ProcessBuilder {
        ProcessBuilder::new(&self.program).args(&self.args)
    }
}

/// Input for a compile step.
#[derive(Debug, Clone)]
pub struct CompileInput {
    /// Source file to compile
    pub source: PathBuf,
    /// Output object file
    pub output: PathBuf,
    /// Include directories
    pub include_dirs: Vec<PathBuf>,
    /// Preprocessor defines (name, optional value)
    pub defines: Vec<(String, Option<String>)>,
    /// Additional compiler flags
    pub cxxflags: Vec<String>,
}

/// Input for linking a shared module.
#[derive(Debug, Clone)]
pub struct LinkInput {
    /// Object files to link
    pub objects: Vec<PathBuf>,
    /// Output module
    pub output: PathBuf,
    /// Library search paths
    pub lib_dirs: Vec<PathBuf>,
    /// Libraries to link (without -l prefix)
    pub libs: Vec<String>,
    /// Additional linker flags
    pub ldflags: Vec<String>,
}

/// Compiler family of a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainFamily {
    Gcc,
    Clang,
    AppleClang,
}

impl ToolchainFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainFamily::Gcc => "gcc",
            ToolchainFamily::Clang => "clang",
            ToolchainFamily::AppleClang => "apple-clang",
        }
    }
}

/// Each toolchain knows how to generate commands for its compiler.
pub trait Toolchain: Send + Sync {
    /// Path of the C++ compiler driver.
    fn cxx_path(&self) -> &Path;

    /// Generate a compile command producing one object file.
    fn compile_command(&self, input: &CompileInput) -> CommandSpec;

    /// Generate a link command producing a loadable module.
    fn link_module_command(&self, input: &LinkInput) -> CommandSpec;

    /// Object file extension.
    fn object_extension(&self) -> &str;
}
