//! Native extension builder.
//!
//! Compiles each source of an [`ExtensionDescriptor`] into an object under
//! `build/temp.<platform>/` and links them into one loadable module under
//! `build/lib.<platform>/`. Steps run one after another; unchanged steps
//! are skipped using [`FingerprintCache`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::builder::fingerprint::{
    CompileFingerprint, FingerprintCache, LinkFingerprint, FINGERPRINT_FILE,
};
use crate::builder::toolchain::{CompileInput, LinkInput, Toolchain};
use crate::core::extension::ExtensionDescriptor;
use crate::core::layout::ProjectLayout;
use crate::util::fs::{ensure_dir, find_files_with_extension, relative_path};
use crate::util::shell::{Shell, Status};

/// Header suffixes tracked as compile dependencies.
const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "hh", "hxx", "cuh"];

/// A module produced by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Dotted module name
    pub name: String,
    /// Linked module under the build lib directory
    pub path: PathBuf,
    /// Whether anything was compiled or linked
    pub rebuilt: bool,
}

/// Drives a toolchain over an extension descriptor.
pub struct NativeBuilder<'a> {
    layout: &'a ProjectLayout,
    toolchain: &'a dyn Toolchain,
    shell: &'a Shell,
    verbose: bool,
}

impl<'a> NativeBuilder<'a> {
    pub fn new(layout: &'a ProjectLayout, toolchain: &'a dyn Toolchain, shell: &'a Shell) -> Self {
        NativeBuilder {
            layout,
            toolchain,
            shell,
            verbose: false,
        }
    }

    /// Print full command lines instead of a progress bar.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Object file path for `source`, mirroring its place in the project.
    pub fn object_path(&self, source: &Path) -> PathBuf {
        let rel = relative_path(self.layout.root(), source);
        let rel = if rel.is_absolute() || rel.starts_with("..") {
            PathBuf::from(source.file_name().unwrap_or(source.as_os_str()))
        } else {
            rel
        };
        self.layout
            .build_temp_dir()
            .join(rel)
            .with_extension(self.toolchain.object_extension())
    }

    /// Every header below the native source directory.
    ///
    /// Each compile fingerprint covers all of them, so editing any header
    /// recompiles every source.
    pub fn headers(&self) -> Result<Vec<PathBuf>> {
        let mut headers = Vec::new();
        for ext in HEADER_EXTENSIONS {
            headers.extend(find_files_with_extension(&self.layout.csrc_dir(), ext)?);
        }
        headers.sort();
        Ok(headers)
    }

    /// Compile and link `ext`.
    pub fn build(&self, ext: &ExtensionDescriptor) -> Result<Artifact> {
        let temp_dir = self.layout.build_temp_dir();
        ensure_dir(&temp_dir)?;

        let cache_path = temp_dir.join(FINGERPRINT_FILE);
        let mut cache = FingerprintCache::load(&cache_path);
        let compiler = self.toolchain.cxx_path().display().to_string();
        let headers = self.headers()?;

        let pb = self.progress_bar(ext.sources().len());
        let mut objects = Vec::with_capacity(ext.sources().len());
        let mut compiled = 0usize;

        for source in ext.sources() {
            let input = CompileInput {
                source: source.clone(),
                output: self.object_path(source),
                include_dirs: ext.include_dirs().to_vec(),
                defines: ext.define_macros().to_vec(),
                cxxflags: ext.compile_args().to_vec(),
            };
            let cmd = self.toolchain.compile_command(&input);

            let fingerprint = CompileFingerprint::for_source(source, &compiler, &cmd.args, &headers)?;
            if cache.needs_compile(source, &input.output, &fingerprint) {
                if let Some(parent) = input.output.parent() {
                    ensure_dir(parent)?;
                }
                let display = relative_path(self.layout.root(), source);
                self.step(&pb, Status::Compiling, display.display());
                if self.verbose {
                    tracing::info!("{}", cmd.to_process().display_command());
                }

                cmd.to_process()
                    .exec_and_check()
                    .with_context(|| format!("failed to compile {}", source.display()))?;

                cache.update_compile(source.clone(), fingerprint);
                compiled += 1;
            } else {
                tracing::debug!("fresh: {}", source.display());
            }

            if let Some(pb) = &pb {
                pb.inc(1);
            }
            objects.push(input.output);
        }

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let output = ext.output_path(&self.layout.build_lib_dir());
        if let Some(parent) = output.parent() {
            ensure_dir(parent)?;
        }

        let link = LinkInput {
            objects: objects.clone(),
            output: output.clone(),
            lib_dirs: ext.library_dirs().to_vec(),
            libs: ext.libraries().to_vec(),
            ldflags: ext.link_args().to_vec(),
        };
        let cmd = self.toolchain.link_module_command(&link);
        let fingerprint = LinkFingerprint::for_link(&objects, &cmd.args)?;

        let linked = cache.needs_link(ext.name(), &output, &fingerprint);
        if linked {
            self.shell.status(Status::Linking, ext.name());
            if self.verbose {
                tracing::info!("{}", cmd.to_process().display_command());
            }
            cmd.to_process()
                .exec_and_check()
                .with_context(|| format!("failed to link {}", ext.name()))?;
            cache.update_link(ext.name().to_string(), fingerprint);
        } else {
            self.shell.status(Status::Fresh, ext.name());
        }

        cache.save(&cache_path)?;

        Ok(Artifact {
            name: ext.name().to_string(),
            path: output,
            rebuilt: compiled > 0 || linked,
        })
    }

    fn progress_bar(&self, total: usize) -> Option<ProgressBar> {
        if self.verbose || self.shell.is_quiet() || total <= 1 {
            return None;
        }
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }

    fn step(&self, pb: &Option<ProgressBar>, status: Status, msg: impl std::fmt::Display) {
        match pb {
            Some(pb) => pb.set_message(msg.to_string()),
            None => self.shell.status(status, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::toolchain::CommandSpec;
    use crate::core::extension::SourceSet;
    use crate::test_support::ExtensionProject;

    /// Toolchain whose "compiler" is `sh`, copying inputs to outputs.
    struct ShellToolchain;

    impl Toolchain for ShellToolchain {
        fn cxx_path(&self) -> &Path {
            Path::new("sh")
        }

        fn compile_command(&self, input: &CompileInput) -> CommandSpec {
            CommandSpec::new("sh").arg("-c").arg(format!(
                "cp '{}' '{}' # {}",
                input.source.display(),
                input.output.display(),
                input.cxxflags.join(" ")
            ))
        }

        fn link_module_command(&self, input: &LinkInput) -> CommandSpec {
            let objects: Vec<_> = input
                .objects
                .iter()
                .map(|o| format!("'{}'", o.display()))
                .collect();
            CommandSpec::new("sh").arg("-c").arg(format!(
                "cat {} > '{}'",
                objects.join(" "),
                input.output.display()
            ))
        }

        fn object_extension(&self) -> &str {
            "o"
        }
    }

    fn descriptor(project: &ExtensionProject, flags: &[&str]) -> ExtensionDescriptor {
        let sources: SourceSet = crate::builder::sources::discover_sources(&project.layout().csrc_dir())
            .unwrap();
        ExtensionDescriptor::builder("torchrl._torchrl", sources)
            .compile_args(flags.iter().map(|s| s.to_string()))
            .build()
    }

    #[cfg(unix)]
    #[test]
    fn test_build_links_module() {
        let project = ExtensionProject::new().with_sources(&["a.cpp", "b.cpp"]);
        let layout = project.layout();
        let shell = Shell::quiet();
        let builder = NativeBuilder::new(&layout, &ShellToolchain, &shell);

        let artifact = builder.build(&descriptor(&project, &["-O3"])).unwrap();
        assert!(artifact.rebuilt);
        assert!(artifact.path.starts_with(layout.build_lib_dir()));
        assert!(artifact.path.exists());
        assert!(builder
            .object_path(&layout.csrc_dir().join("a.cpp"))
            .starts_with(layout.build_temp_dir()));
    }

    #[cfg(unix)]
    #[test]
    fn test_rebuild_only_when_flags_change() {
        let project = ExtensionProject::new().with_sources(&["a.cpp"]);
        let layout = project.layout();
        let shell = Shell::quiet();
        let builder = NativeBuilder::new(&layout, &ShellToolchain, &shell);

        assert!(builder.build(&descriptor(&project, &["-O3"])).unwrap().rebuilt);
        assert!(!builder.build(&descriptor(&project, &["-O3"])).unwrap().rebuilt);
        assert!(builder.build(&descriptor(&project, &["-O0", "-g"])).unwrap().rebuilt);
    }

    #[cfg(unix)]
    #[test]
    fn test_header_edit_rebuilds_module() {
        let project = ExtensionProject::new().with_sources(&["a.cpp"]);
        project.write("torchrl/csrc/include/defs.h", "#define VALUE 1\n");
        let layout = project.layout();
        let shell = Shell::quiet();
        let builder = NativeBuilder::new(&layout, &ShellToolchain, &shell);

        let first = builder.build(&descriptor(&project, &["-O3"])).unwrap();
        assert!(first.rebuilt);
        assert!(!builder.build(&descriptor(&project, &["-O3"])).unwrap().rebuilt);

        project.write("torchrl/csrc/include/defs.h", "#define VALUE 424242\n");
        let second = builder.build(&descriptor(&project, &["-O3"])).unwrap();
        assert!(second.rebuilt);
    }

    #[cfg(unix)]
    #[test]
    fn test_compile_failure_propagates() {
        struct FailingToolchain;
        impl Toolchain for FailingToolchain {
            fn cxx_path(&self) -> &Path {
                Path::new("false")
            }
            fn compile_command(&self, _input: &CompileInput) -> CommandSpec {
                CommandSpec::new("sh").args(["-c", "echo 'error: expected ;' >&2; exit 1"])
            }
            fn link_module_command(&self, _input: &LinkInput) -> CommandSpec {
                CommandSpec::new("true")
            }
            fn object_extension(&self) -> &str {
                "o"
            }
        }

        let project = ExtensionProject::new().with_sources(&["a.cpp"]);
        let layout = project.layout();
        let shell = Shell::quiet();
        let err = NativeBuilder::new(&layout, &FailingToolchain, &shell)
            .build(&descriptor(&project, &[]))
            .unwrap_err();

        let msg = format!("{:#}", err);
        assert!(msg.contains("failed to compile"));
        assert!(msg.contains("expected ;"));
    }
}
