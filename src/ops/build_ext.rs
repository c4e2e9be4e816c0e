//! Implementation of `torchrl-build build`.

use anyhow::Result;

use crate::builder::{detect_toolchain, get_extensions, Artifact, NativeBuilder, TorchPaths};
use crate::core::extension::ExtensionDescriptor;
use crate::core::profile::BuildMode;
use crate::util::context::GlobalContext;
use crate::util::fs::{copy_file, relative_path};
use crate::util::shell::{Shell, Status};
use crate::util::vcs::GitInfo;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Optimization mode
    pub mode: BuildMode,

    /// Copy the module into the package directory after linking
    pub inplace: bool,

    /// Describe the extension as JSON instead of building it
    pub dry_run: bool,
}

/// Result of a build.
#[derive(Debug, Clone, Default)]
pub struct BuildResult {
    /// Descriptors the build was planned from
    pub extensions: Vec<ExtensionDescriptor>,

    /// Linked modules (empty for a dry run)
    pub artifacts: Vec<Artifact>,
}

/// Build the project's native extension.
pub fn build(ctx: &GlobalContext, opts: &BuildOptions, shell: &Shell) -> Result<BuildResult> {
    let layout = ctx.layout();
    let config = ctx.config();

    if let Some(git) = GitInfo::probe(layout.root()) {
        tracing::debug!(
            "building at {} (branch: {}, tag: {})",
            git.commit,
            git.branch.as_deref().unwrap_or("-"),
            git.tag.as_deref().unwrap_or("-")
        );
    }

    let torch = if opts.dry_run {
        None
    } else {
        if config.torch.probe_enabled() {
            shell.status(Status::Probing, config.torch.python().display());
        }
        TorchPaths::probe(&config.torch)
    };

    let extensions = get_extensions(layout, opts.mode, &config.build, torch.as_ref())?;

    if opts.dry_run {
        return Ok(BuildResult {
            extensions,
            artifacts: Vec::new(),
        });
    }

    let toolchain = detect_toolchain(&config.toolchain)?;
    let builder = NativeBuilder::new(layout, toolchain.as_ref(), shell).verbose(ctx.is_verbose());

    let inplace = opts.inplace || config.build.is_inplace();
    let mut artifacts = Vec::with_capacity(extensions.len());
    for ext in &extensions {
        let artifact = builder.build(ext)?;

        if inplace {
            let dest = ext.output_path(layout.root());
            copy_file(&artifact.path, &dest)?;
            shell.status(Status::Copied, relative_path(layout.root(), &dest).display());
        }

        shell.status(
            Status::Finished,
            format!(
                "`{}` ({}) -> {}",
                artifact.name,
                opts.mode,
                relative_path(layout.root(), &artifact.path).display()
            ),
        );
        artifacts.push(artifact);
    }

    Ok(BuildResult {
        extensions,
        artifacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ExtensionProject;
    use crate::util::config::Config;

    #[test]
    fn test_dry_run_compiles_nothing() {
        let project = ExtensionProject::new().with_sources(&["a.cpp"]);
        let ctx = GlobalContext::with_config(project.root(), Config::default());
        let opts = BuildOptions {
            mode: BuildMode::Debug,
            dry_run: true,
            ..BuildOptions::default()
        };

        let result = build(&ctx, &opts, &Shell::quiet()).unwrap();
        assert_eq!(result.extensions.len(), 1);
        assert!(result.artifacts.is_empty());
        assert!(!ctx.layout().build_dir().exists());
    }

    #[test]
    fn test_missing_sources_fail_before_compiling() {
        let project = ExtensionProject::new();
        let ctx = GlobalContext::with_config(project.root(), Config::default());

        let err = build(&ctx, &BuildOptions::default(), &Shell::quiet()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(!ctx.layout().build_dir().exists());
    }
}
