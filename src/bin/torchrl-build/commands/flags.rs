//! `torchrl-build flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use crate::commands::build_mode;
use torchrl_build::core::BuildProfile;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let profile = BuildProfile::for_mode(build_mode(args.debug));

    if !args.link {
        println!("# Compile flags ({}):", profile.mode);
        for flag in &profile.compile_flags {
            println!("{}", flag);
        }
    }

    if !args.compile {
        if !args.link {
            println!();
        }
        println!("# Link flags ({}):", profile.mode);
        for flag in &profile.link_flags {
            println!("{}", flag);
        }
    }

    Ok(())
}
