//! `torchrl-build metadata` command

use anyhow::Result;

use crate::cli::MetadataArgs;
use crate::commands::GlobalArgs;
use torchrl_build::core::package::FRAMEWORK_VERSION_ENV;
use torchrl_build::ops::metadata::{metadata, MetadataFormat};

pub fn execute(global: &GlobalArgs, args: MetadataArgs) -> Result<()> {
    let ctx = global.context()?;

    let format = args
        .format
        .parse::<MetadataFormat>()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let pin = std::env::var(FRAMEWORK_VERSION_ENV).ok();
    let rendered = metadata(&ctx, pin.as_deref(), format, &global.shell())?;
    println!("{}", rendered);

    Ok(())
}
