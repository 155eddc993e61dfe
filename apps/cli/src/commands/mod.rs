//! Subcommand implementations.

pub mod consolidate;
pub mod generate;
pub mod upload;
