//! `torchrl-build build` command

use anyhow::{Context, Result};

use crate::cli::BuildArgs;
use crate::commands::{build_mode, GlobalArgs};
use torchrl_build::ops::build_ext::{build, BuildOptions};

pub fn execute(global: &GlobalArgs, args: BuildArgs) -> Result<()> {
    let ctx = global.context()?;
    let shell = global.shell();

    let opts = BuildOptions {
        mode: build_mode(args.debug),
        inplace: args.inplace,
        dry_run: args.dry_run,
    };

    let result = build(&ctx, &opts, &shell)?;

    if args.dry_run {
        let json = serde_json::to_string_pretty(&result.extensions)
            .context("failed to serialize extension description")?;
        println!("{}", json);
    }

    Ok(())
}
