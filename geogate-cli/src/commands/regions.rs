//! Regions command - print the capability table.

use geogate::region::Region;

use super::common::join_list;
use crate::error::CliError;

pub fn run() -> Result<(), CliError> {
    println!(
        "{:<10} {:<4} {:<22} {:<26} {:<15} {:<14} Regulated",
        "Region", "Cur", "Payment", "Auth", "Backend", "Target"
    );

    for region in Region::ALL {
        let profile = region.profile();
        println!(
            "{:<10} {:<4} {:<22} {:<26} {:<15} {:<14} {}",
            region.as_str(),
            profile.currency.code(),
            join_list(profile.payment_methods),
            join_list(profile.auth_methods),
            profile.database_backend.as_str(),
            profile.deployment_target().as_str(),
            if profile.regulated_privacy { "yes" } else { "no" }
        );
    }

    Ok(())
}
