//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose) are inherited by all subcommands
//! - Flags given here override environment variables and config files

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::value_objects::PortPool;

/// Elkform - assemble a logging cluster topology from a host inventory
#[derive(Parser, Debug)]
#[command(name = "elkform")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable output (JSON topology, NDJSON events on stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv); ELKFORM_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Inputs shared by every command that assembles a topology
#[derive(Args, Debug, Clone)]
pub struct AssemblyArgs {
    /// Host inventory (TOML with [[hosts]] entries)
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Configuration file (defaults to ./elkform.toml, then the user config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of template overrides
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Cluster name
    #[arg(long)]
    pub name: Option<String>,

    /// External port pool as low-high
    #[arg(long, value_name = "LOW-HIGH")]
    pub port_pool: Option<PortPool>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble the topology and print it
    Assemble {
        #[command(flatten)]
        assembly: AssemblyArgs,

        /// Write the JSON topology to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show which hosts would run the coordination ensemble
    Quorum {
        /// Host inventory (TOML with [[hosts]] entries)
        #[arg(short, long)]
        inventory: PathBuf,
    },

    /// Compare a fresh assembly with a previously written topology
    Diff {
        #[command(flatten)]
        assembly: AssemblyArgs,

        /// Topology JSON written by an earlier `assemble --output`
        #[arg(short, long)]
        previous: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_assemble_with_overrides() {
        let cli = Cli::try_parse_from([
            "elkform",
            "--json",
            "assemble",
            "--inventory",
            "hosts.toml",
            "--port-pool",
            "5000-5010",
            "-vv",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Assemble { assembly, output } => {
                assert_eq!(assembly.inventory, PathBuf::from("hosts.toml"));
                assert_eq!(assembly.port_pool, Some(PortPool::new(5000, 5010).unwrap()));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_inverted_port_pool() {
        assert!(Cli::try_parse_from([
            "elkform",
            "assemble",
            "--inventory",
            "hosts.toml",
            "--port-pool",
            "6000-5000",
        ])
        .is_err());
    }
}
