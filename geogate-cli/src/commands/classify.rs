//! Classify command - pure country code classification.

use geogate::region::classify;

use super::common::print_descriptor;
use crate::error::CliError;

pub fn run(country: &str, json: bool) -> Result<(), CliError> {
    print_descriptor(&classify(country), json)
}
