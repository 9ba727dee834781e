//! CLI command implementations.

pub mod analyze;
pub mod brief;
pub mod config;
pub mod generate;
