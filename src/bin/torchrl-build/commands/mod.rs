//! Command implementations

use std::path::PathBuf;

use anyhow::Result;

use torchrl_build::core::profile::{BuildMode, DEBUG_ENV};
use torchrl_build::util::shell::{ColorChoice, Shell};
use torchrl_build::util::GlobalContext;

pub mod build;
pub mod clean;
pub mod completions;
pub mod flags;
pub mod metadata;

/// Flags shared by every subcommand.
pub struct GlobalArgs {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub no_color: bool,
}

impl GlobalArgs {
    pub fn context(&self) -> Result<GlobalContext> {
        Ok(GlobalContext::new(self.root.as_deref())?.verbose(self.verbose))
    }

    pub fn shell(&self) -> Shell {
        if self.no_color {
            Shell::new(ColorChoice::Never)
        } else {
            Shell::new(ColorChoice::Auto)
        }
    }
}

/// `--debug` wins; otherwise `DEBUG=1` selects debug mode.
pub fn build_mode(debug_flag: bool) -> BuildMode {
    if debug_flag {
        BuildMode::Debug
    } else {
        BuildMode::from_debug_var(std::env::var(DEBUG_ENV).ok().as_deref())
    }
}
