//! The extension descriptor handed to the native builder.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::layout::native_module_extension;

/// Fully qualified name of the native module.
pub const EXTENSION_NAME: &str = "torchrl._torchrl";

/// Deduplicated set of native source files.
pub type SourceSet = BTreeSet<PathBuf>;

/// Compiler arguments, keyed by language the way extension helpers expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileArgs {
    pub cxx: Vec<String>,
}

/// A native module: its name, sources, and compile/link configuration.
///
/// Built once per invocation by the orchestrator and never mutated after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionDescriptor {
    name: String,
    sources: SourceSet,
    include_dirs: Vec<PathBuf>,
    define_macros: Vec<(String, Option<String>)>,
    library_dirs: Vec<PathBuf>,
    libraries: Vec<String>,
    extra_compile_args: CompileArgs,
    extra_link_args: Vec<String>,
}

impl ExtensionDescriptor {
    pub fn builder(name: impl Into<String>, sources: SourceSet) -> ExtensionDescriptorBuilder {
        ExtensionDescriptorBuilder {
            inner: ExtensionDescriptor {
                name: name.into(),
                sources,
                include_dirs: Vec::new(),
                define_macros: Vec::new(),
                library_dirs: Vec::new(),
                libraries: Vec::new(),
                extra_compile_args: CompileArgs::default(),
                extra_link_args: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    pub fn define_macros(&self) -> &[(String, Option<String>)] {
        &self.define_macros
    }

    pub fn library_dirs(&self) -> &[PathBuf] {
        &self.library_dirs
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn compile_args(&self) -> &[String] {
        &self.extra_compile_args.cxx
    }

    pub fn link_args(&self) -> &[String] {
        &self.extra_link_args
    }

    /// Last component of the dotted name (`_torchrl`).
    pub fn basename(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Module file name without a Python ABI suffix (`_torchrl.so`).
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.basename(), native_module_extension())
    }

    /// Module path relative to a library root (`torchrl/_torchrl.so`).
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.name.split('.').collect();
        path.set_file_name(self.file_name());
        path
    }

    /// Where the module lands under `lib_root`.
    pub fn output_path(&self, lib_root: &Path) -> PathBuf {
        lib_root.join(self.relative_path())
    }
}

/// Assembles an [`ExtensionDescriptor`]; consumed by [`build`](Self::build).
#[derive(Debug)]
pub struct ExtensionDescriptorBuilder {
    inner: ExtensionDescriptor,
}

impl ExtensionDescriptorBuilder {
    pub fn include_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.inner.include_dirs.extend(dirs);
        self
    }

    pub fn define(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.inner
            .define_macros
            .push((name.into(), value.map(str::to_string)));
        self
    }

    pub fn library_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.inner.library_dirs.extend(dirs);
        self
    }

    pub fn libraries(mut self, libs: impl IntoIterator<Item = String>) -> Self {
        self.inner.libraries.extend(libs);
        self
    }

    pub fn compile_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.inner.extra_compile_args.cxx.extend(args);
        self
    }

    pub fn link_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.inner.extra_link_args.extend(args);
        self
    }

    pub fn build(self) -> ExtensionDescriptor {
        self.inner
    }
}
