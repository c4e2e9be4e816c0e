//! torchrl-build CLI - builds and cleans the torchrl native extension

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use torchrl_build::core::ExtensionError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = e.downcast_ref::<ExtensionError>().and_then(|e| e.help()) {
            eprintln!("{}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("torchrl_build=debug")
    } else {
        EnvFilter::new("torchrl_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let global = commands::GlobalArgs {
        root: cli.root,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    match cli.command {
        Commands::Build(args) => commands::build::execute(&global, args),
        Commands::Clean(args) => commands::clean::execute(&global, args),
        Commands::Metadata(args) => commands::metadata::execute(&global, args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
