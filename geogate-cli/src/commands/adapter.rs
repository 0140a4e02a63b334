//! Adapter command - build a deployment adapter and describe it.

use geogate::adapter::{AdapterFactory, AdapterHandle, AdapterKind, DeploymentRegion};

use super::common::join_list;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the adapter command.
///
/// Construction errors are returned as-is so a misconfigured deployment
/// fails loudly.
pub fn run(
    runner: &CliRunner,
    kind: AdapterKind,
    region: Option<DeploymentRegion>,
) -> Result<(), CliError> {
    let config = runner.config();
    let region = region.unwrap_or_else(|| config.deployment_region());

    let factory = AdapterFactory::new(config.adapter_config());
    let handle = factory.get_adapter(kind, region)?;

    println!("Adapter:    {} ({})", handle.provider_name(), handle.kind());
    println!("Deployment: {}", region);

    match &handle {
        AdapterHandle::Auth(auth) => {
            println!("Methods:    {}", join_list(auth.supported_methods()));
            for method in auth.supported_methods() {
                if let Some(url) = auth.sign_in_url(*method) {
                    println!("Sign-in:    {} -> {}", method, url);
                }
            }
        }
        AdapterHandle::Database(database) => {
            println!("Backend:    {}", database.backend());
            println!("Endpoint:   {}", database.endpoint());
        }
    }

    Ok(())
}
