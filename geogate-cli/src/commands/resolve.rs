//! Resolve command - run one IP through the detection chain.

use std::time::Duration;

use geogate::{CapabilityRouter, ResolveOptions};
use tracing::info;

use super::common::print_descriptor;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the resolve command.
pub struct ResolveArgs {
    pub ip: String,
    pub timeout_ms: Option<u64>,
    pub json: bool,
}

/// Run the resolve command.
pub fn run(runner: &CliRunner, args: ResolveArgs) -> Result<(), CliError> {
    let config = runner.config();
    if args.timeout_ms == Some(0) {
        return Err(CliError::Config("--timeout-ms must be positive".to_string()));
    }

    let router =
        CapabilityRouter::from_config(&config.provider_config(), config.resolver_config())?;
    let options = ResolveOptions {
        timeout: args.timeout_ms.map(Duration::from_millis),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let descriptor = runtime.block_on(router.resolve(&args.ip, options));

    let deployment = config.deployment_region();
    info!(
        ip = %args.ip,
        region = %descriptor.region(),
        deployment = %deployment,
        "Resolved"
    );

    print_descriptor(&descriptor, args.json)?;
    if !args.json {
        println!(
            "Served by {} deployment: {}",
            deployment,
            if descriptor.is_served_by(deployment) { "yes" } else { "no" }
        );
    }

    Ok(())
}
