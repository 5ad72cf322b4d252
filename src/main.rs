//! Elkform CLI - assemble a logging cluster topology
//!
//! Usage: elkform <COMMAND>
//!
//! Commands:
//!   assemble  Assemble the topology from a host inventory
//!   quorum    Show which hosts would run the coordination ensemble
//!   diff      Compare a fresh assembly with an earlier one

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use elkform::presentation::cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = std::env::var("ELKFORM_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Assemble { assembly, output } => {
            commands::assemble::cmd_assemble(assembly, output.as_deref(), cli.json, cli.verbose)
        }
        Commands::Quorum { inventory } => commands::quorum::cmd_quorum(inventory, cli.json),
        Commands::Diff { assembly, previous } => {
            commands::diff::cmd_diff(assembly, previous, cli.json, cli.verbose)
        }
    }
}
