//! GeoGate CLI - Command-line interface
//!
//! Resolve visitor IPs to regional capabilities, inspect the region table and
//! check that the deployment's adapters can be built from configuration.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use geogate::adapter::{AdapterKind, DeploymentRegion};

use commands::config::ConfigCommands;
use error::CliError;
use runner::CliRunner;

#[derive(Debug, Parser)]
#[command(name = "geogate", version, about = "Visitor region detection and capability routing")]
struct Cli {
    /// Configuration file (defaults to <config dir>/geogate/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve an IP address through the full detection chain
    Resolve {
        /// IPv4 or IPv6 address
        ip: String,

        /// Per-attempt timeout in milliseconds (overrides config)
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify an ISO country code without any network access
    Classify {
        /// Two-letter country code (e.g. DE)
        country: String,

        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build an adapter for a deployment region and describe it
    Adapter {
        /// Adapter kind: auth or database
        kind: AdapterKind,

        /// Deployment region: china or international (defaults to config)
        #[arg(long)]
        region: Option<DeploymentRegion>,
    },

    /// Print the region capability table
    Regions,

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let runner = CliRunner::new(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Resolve {
            ip,
            timeout_ms,
            json,
        } => {
            runner.log_startup("resolve");
            commands::resolve::run(
                &runner,
                commands::resolve::ResolveArgs {
                    ip,
                    timeout_ms,
                    json,
                },
            )
        }
        Commands::Classify { country, json } => commands::classify::run(&country, json),
        Commands::Adapter { kind, region } => {
            runner.log_startup("adapter");
            commands::adapter::run(&runner, kind, region)
        }
        Commands::Regions => commands::regions::run(),
        Commands::Config { command } => commands::config::run(&runner, command),
    }
}
