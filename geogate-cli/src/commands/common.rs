//! Output helpers shared across commands.

use std::fmt::Display;

use geogate::region::CapabilityDescriptor;

use crate::error::CliError;

/// Joins displayable items with ", ", or "(none)" when empty.
pub fn join_list<T: Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints a descriptor as aligned text or pretty JSON.
pub fn print_descriptor(descriptor: &CapabilityDescriptor, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(descriptor)?);
        return Ok(());
    }

    let country = if descriptor.country_code().is_empty() {
        "(unknown)"
    } else {
        descriptor.country_code()
    };

    println!("Region:            {}", descriptor.region());
    println!("Country:           {}", country);
    println!("Currency:          {}", descriptor.currency());
    println!("Payment methods:   {}", join_list(descriptor.payment_methods()));
    println!("Auth methods:      {}", join_list(descriptor.auth_methods()));
    println!("Database backend:  {}", descriptor.database_backend());
    println!("Deployment target: {}", descriptor.deployment_target());
    println!(
        "Regulated privacy: {}",
        if descriptor.regulated_privacy() { "yes" } else { "no" }
    );
    Ok(())
}
