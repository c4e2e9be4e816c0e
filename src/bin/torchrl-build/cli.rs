//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// torchrl-build - build harness for the torchrl native extension
#[derive(Parser)]
#[command(name = "torchrl-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile and link the native extension
    #[command(alias = "build_ext")]
    Build(BuildArgs),

    /// Remove compiled modules and build directories
    Clean(CleanArgs),

    /// Print package metadata
    Metadata(MetadataArgs),

    /// Show compile/link flags for a build mode
    Flags(FlagsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build in debug mode (also enabled by DEBUG=1)
    #[arg(long)]
    pub debug: bool,

    /// Copy the built module into the package directory
    #[arg(long)]
    pub inplace: bool,

    /// Print the extension description as JSON without compiling
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Also remove platform lib and bdist directories during the default cleanup
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct MetadataArgs {
    /// Output format (json or toml)
    #[arg(long, default_value = "json")]
    pub format: String,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Show flags of the debug build (also enabled by DEBUG=1)
    #[arg(long)]
    pub debug: bool,

    /// Show compile flags only
    #[arg(long, conflicts_with = "link")]
    pub compile: bool,

    /// Show link flags only
    #[arg(long)]
    pub link: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: CompletionShell,
}
