//! Configuration CLI commands.
//!
//! Provides `config get`, `config list`, and `config path` for inspecting the
//! settings the other commands will use.

use clap::Subcommand;
use geogate::config::ConfigKey;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., cache.ttl_secs)
        key: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(runner: &CliRunner, command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(runner, &key),
        ConfigCommands::List => run_list(runner),
        ConfigCommands::Path => {
            println!("{}", runner.config_path().display());
            Ok(())
        }
    }
}

fn run_get(runner: &CliRunner, key: &str) -> Result<(), CliError> {
    let config_key: ConfigKey = key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'geogate config list' to see available keys.",
            key
        ))
    })?;

    let value = config_key.get(runner.config());
    if value.is_empty() {
        println!("(not set)");
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn run_list(runner: &CliRunner) -> Result<(), CliError> {
    println!("Configuration Settings ({})", runner.config_path().display());
    println!("======================");
    println!();

    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("[{}]", section);
            current_section = section;
        }

        let value = key.get(runner.config());
        if value.is_empty() {
            println!("  {} = (not set)", key.key_name());
        } else if key.is_secret() {
            println!("  {} = ********", key.key_name());
        } else {
            println!("  {} = {}", key.key_name(), value);
        }
    }

    Ok(())
}
