//! Configuration loading for projectsmith
//!
//! Defaults are merged with `.projectsmith/config.yaml`, an optional
//! `.projectsmith/local.yaml` and `PROJECTSMITH_*` environment variables,
//! then validated.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
