//! Slipway CLI - stage native media libraries for serverless Python runtimes

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use slipway::ProbeError;
use slipway::util::shell::Shell;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        // A post-build import failure is "built but broken", distinguishable
        // from "never attempted".
        let code = if e.downcast_ref::<ProbeError>().is_some() {
            2
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color_choice());

    // A bare `slipway` runs the build.
    match cli.command.unwrap_or_default() {
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Clean(args) => commands::clean::execute(args, &shell),
        Commands::Status => commands::status::execute(&shell),
        Commands::Verify => commands::verify::execute(&shell),
    }
}
