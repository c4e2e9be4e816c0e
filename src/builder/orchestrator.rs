//! Extension assembly: sources plus the flags of the selected build mode.

use anyhow::Result;

use crate::builder::sources::discover_sources;
use crate::builder::torch::TorchPaths;
use crate::core::extension::{ExtensionDescriptor, EXTENSION_NAME};
use crate::core::layout::ProjectLayout;
use crate::core::profile::{BuildMode, BuildProfile};
use crate::util::config::BuildSettings;

/// Describe the extensions of the project at `layout`.
///
/// Always yields exactly one descriptor, for `torchrl._torchrl`. Fails if
/// `torchrl/csrc` is missing or holds no `*.cpp` file.
pub fn get_extensions(
    layout: &ProjectLayout,
    mode: BuildMode,
    settings: &BuildSettings,
    torch: Option<&TorchPaths>,
) -> Result<Vec<ExtensionDescriptor>> {
    println!("Compiling in {} mode", mode);

    let profile = BuildProfile::for_mode(mode);
    let sources = discover_sources(&layout.csrc_dir())?;

    let basename = EXTENSION_NAME.rsplit('.').next().unwrap_or(EXTENSION_NAME);

    let mut builder = ExtensionDescriptor::builder(EXTENSION_NAME, sources)
        .include_dirs([layout.root().to_path_buf()])
        .include_dirs(settings.include_dirs.iter().cloned())
        .define("TORCH_EXTENSION_NAME", Some(basename))
        .define("TORCH_API_INCLUDE_EXTENSION_H", None)
        .library_dirs(settings.library_dirs.iter().cloned())
        .libraries(settings.libraries.iter().cloned())
        .compile_args(profile.compile_flags)
        .compile_args(settings.extra_compile_args.iter().cloned())
        .link_args(profile.link_flags)
        .link_args(settings.extra_link_args.iter().cloned());

    if let Some(torch) = torch {
        builder = builder
            .include_dirs(torch.include_dirs.iter().cloned())
            .library_dirs(torch.library_dirs.iter().cloned())
            .libraries(torch.libraries.iter().cloned());
    }

    Ok(vec![builder.build()])
}
