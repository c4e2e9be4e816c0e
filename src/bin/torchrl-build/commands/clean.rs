//! `torchrl-build clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use crate::commands::GlobalArgs;
use torchrl_build::ops::clean::{clean, standard_clean};
use torchrl_build::util::Status;

pub fn execute(global: &GlobalArgs, args: CleanArgs) -> Result<()> {
    let ctx = global.context()?;
    let shell = global.shell();
    let layout = ctx.layout();

    let report = clean(layout, || standard_clean(layout, args.all))?;

    if report.is_empty() {
        tracing::debug!("nothing to clean");
    } else {
        shell.status(
            Status::Removed,
            format!(
                "{} module(s), {} director{}",
                report.removed_artifacts.len(),
                report.removed_dirs.len(),
                if report.removed_dirs.len() == 1 { "y" } else { "ies" }
            ),
        );
    }

    Ok(())
}
