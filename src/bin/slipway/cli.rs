//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use slipway::util::shell::ColorChoice;

/// Slipway - stage native media libraries for serverless Python runtimes
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn color_choice(&self) -> ColorChoice {
        if self.no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone, compile, and stage the binding (the default)
    Build(BuildArgs),

    /// Remove build artifacts
    Clean(CleanArgs),

    /// Show the build record and the gate decision
    Status,

    /// Import the built module and print its version
    Verify,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Build(BuildArgs::default())
    }
}

#[derive(Args, Default)]
pub struct BuildArgs {
    /// Rebuild even if the gate says the artifact is intact
    #[arg(long)]
    pub force: bool,

    /// Keep the cloned source tree after a successful build
    #[arg(long)]
    pub keep_work: bool,

    /// Recipe file to use instead of Slipway.toml
    #[arg(long)]
    pub recipe: Option<PathBuf>,
}

#[derive(Args, Default)]
pub struct CleanArgs {
    /// Also remove the build record
    #[arg(long)]
    pub all: bool,
}
