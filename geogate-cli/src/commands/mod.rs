//! Subcommand implementations.

pub mod adapter;
pub mod classify;
pub mod common;
pub mod config;
pub mod regions;
pub mod resolve;
