//! Implementation of `torchrl-build metadata`.

use std::str::FromStr;

use anyhow::{Context, Result};

use crate::core::package::PackageMetadata;
use crate::util::context::GlobalContext;
use crate::util::shell::{Shell, Status};

/// Output format for package metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataFormat {
    #[default]
    Json,
    Toml,
}

impl FromStr for MetadataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(MetadataFormat::Json),
            "toml" => Ok(MetadataFormat::Toml),
            _ => Err(format!(
                "invalid format '{}'; expected 'json' or 'toml'",
                s
            )),
        }
    }
}

/// Describe the package and render it.
pub fn metadata(
    ctx: &GlobalContext,
    framework_pin: Option<&str>,
    format: MetadataFormat,
    shell: &Shell,
) -> Result<String> {
    let meta = PackageMetadata::describe(ctx.root(), framework_pin)?;
    if let Some(core) = meta.install_requires.first() {
        shell.status(Status::Dependency, core);
    }
    render(&meta, format)
}

pub fn render(meta: &PackageMetadata, format: MetadataFormat) -> Result<String> {
    match format {
        MetadataFormat::Json => {
            serde_json::to_string_pretty(meta).context("failed to serialize metadata as JSON")
        }
        MetadataFormat::Toml => {
            toml::to_string_pretty(meta).context("failed to serialize metadata as TOML")
        }
    }
}
